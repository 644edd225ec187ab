use std::fmt;

use tracing::{debug, warn};

use crate::certificate::Certificate;
use crate::kernel::{Depth, Error, Predicate, Scope, Variable};
use crate::proof_step::{Inference, Justification, ProofStep};

/// The rule name used in errors raised while citing a lemma.
pub const CITE: &str = "cite";

/// Settings that govern how a theorem may be proved.
#[derive(Clone, Debug, Default)]
pub struct ProofConfig {
    /// Reject citing axioms. Only sealed theorems may be cited.
    pub strict: bool,

    /// The deepest scope an assumption may open. None for no limit.
    pub max_depth: Option<Depth>,
}

/// Errors at the level of a whole proof.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProofError {
    // An inference rule refused. The proof can continue.
    Rule(Error),

    // A step that is not valid in the current scope. The proof is aborted.
    UnverifiedStep(String),

    // The result was set while a hypothesis was open, or it is not valid at depth 1.
    // The proof is aborted.
    IncompleteDischarge { depth: Depth, result: String },

    // An earlier failure aborted this proof.
    Aborted(String),

    // The proof was already sealed.
    Sealed(String),

    // A cited rule has no result yet.
    LemmaNotSealed(String),

    // A cited rule was given the wrong number of premises.
    LemmaArity {
        name: String,
        expected: usize,
        found: usize,
    },

    // Strict mode forbids citing this axiom.
    AxiomForbidden(String),

    // An assumption would go deeper than the configured limit.
    TooDeep { max_depth: Depth },
}

impl ProofError {
    pub fn error_type(&self) -> &'static str {
        match self {
            ProofError::Rule(e) => e.error_type(),
            ProofError::UnverifiedStep(_) => "UnverifiedStep",
            ProofError::IncompleteDischarge { .. } => "IncompleteDischarge",
            ProofError::Aborted(_) => "Aborted",
            ProofError::Sealed(_) => "Sealed",
            ProofError::LemmaNotSealed(_) => "LemmaNotSealed",
            ProofError::LemmaArity { .. } => "LemmaArity",
            ProofError::AxiomForbidden(_) => "AxiomForbidden",
            ProofError::TooDeep { .. } => "TooDeep",
        }
    }

    /// Whether this error ends the proof attempt.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ProofError::UnverifiedStep(_)
                | ProofError::IncompleteDischarge { .. }
                | ProofError::Aborted(_)
        )
    }
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProofError::Rule(e) => write!(f, "{}", e),
            ProofError::UnverifiedStep(predicate) => {
                write!(f, "step of theorem incorrect: {}", predicate)
            }
            ProofError::IncompleteDischarge { depth, result } => {
                write!(
                    f,
                    "could not set result at depth {}: {}",
                    depth, result
                )
            }
            ProofError::Aborted(name) => write!(f, "proof of {} was aborted", name),
            ProofError::Sealed(name) => write!(f, "{} is already sealed", name),
            ProofError::LemmaNotSealed(name) => write!(f, "{} has no result to cite", name),
            ProofError::LemmaArity {
                name,
                expected,
                found,
            } => write!(
                f,
                "{} takes {} premises but was given {}",
                name, expected, found
            ),
            ProofError::AxiomForbidden(name) => {
                write!(f, "axiom {} cannot be cited in strict mode", name)
            }
            ProofError::TooDeep { max_depth } => {
                write!(f, "assumption would exceed the maximum depth {}", max_depth)
            }
        }
    }
}

impl std::error::Error for ProofError {}

impl From<Error> for ProofError {
    fn from(error: Error) -> Self {
        ProofError::Rule(error)
    }
}

impl From<ProofError> for String {
    fn from(error: ProofError) -> Self {
        error.to_string()
    }
}

/// Anything that can be cited from inside a theorem: premises entail a result.
pub trait Rule {
    fn name(&self) -> &str;

    fn premises(&self) -> &[Predicate];

    /// The result, once the rule is sealed.
    fn result(&self) -> Option<&Predicate>;

    fn is_axiom(&self) -> bool {
        false
    }

    fn certificate(&self) -> Option<Certificate>;
}

fn render_all(predicates: &[Predicate]) -> Vec<String> {
    predicates.iter().map(|p| p.to_string()).collect()
}

/// An axiom records premises and a result. Nothing about it is checked.
#[derive(Clone, Debug)]
pub struct Axiom {
    name: String,
    premises: Vec<Predicate>,
    result: Option<Predicate>,
}

impl Axiom {
    pub fn new(name: &str) -> Axiom {
        Axiom {
            name: name.to_string(),
            premises: vec![],
            result: None,
        }
    }

    /// A sealed axiom, built in one go.
    pub fn sealed(name: &str, premises: Vec<Predicate>, result: Predicate) -> Axiom {
        Axiom {
            name: name.to_string(),
            premises,
            result: Some(result),
        }
    }

    pub fn premise(&mut self, premise: Predicate) -> Result<Predicate, ProofError> {
        if self.result.is_some() {
            return Err(ProofError::Sealed(self.name.clone()));
        }
        self.premises.push(premise.clone());
        Ok(premise)
    }

    /// Seals the axiom.
    pub fn set_result(&mut self, result: Predicate) -> Result<Predicate, ProofError> {
        if self.result.is_some() {
            return Err(ProofError::Sealed(self.name.clone()));
        }
        debug!(axiom = %self.name, result = %result, "sealed axiom");
        self.result = Some(result.clone());
        Ok(result)
    }

    pub fn is_sealed(&self) -> bool {
        self.result.is_some()
    }
}

impl Rule for Axiom {
    fn name(&self) -> &str {
        &self.name
    }

    fn premises(&self) -> &[Predicate] {
        &self.premises
    }

    fn result(&self) -> Option<&Predicate> {
        self.result.as_ref()
    }

    fn is_axiom(&self) -> bool {
        true
    }

    fn certificate(&self) -> Option<Certificate> {
        let result = self.result.as_ref()?;
        Some(Certificate::unproved(
            self.name.clone(),
            render_all(&self.premises),
            result.to_string(),
        ))
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rule(f, self)
    }
}

fn write_rule(f: &mut fmt::Formatter, rule: &dyn Rule) -> fmt::Result {
    write!(f, "{}:", rule.name())?;
    for (i, premise) in rule.premises().iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, " {}", premise)?;
    }
    match rule.result() {
        Some(result) => write!(f, " |- {}", result),
        None => write!(f, " |- ?"),
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProofState {
    Building,
    Sealed,
    Aborted,
}

/// A theorem is proved step by step.
///
/// Every step must be valid in the theorem's own scope when it is recorded, and the result
/// can only be set once every assumption has been discharged. A failed step or result
/// aborts the theorem, and after that every mutating call fails.
#[derive(Debug)]
pub struct Theorem {
    name: String,
    config: ProofConfig,
    scope: Scope,
    premises: Vec<Predicate>,
    steps: Vec<ProofStep>,
    result: Option<Predicate>,
    state: ProofState,
}

impl Theorem {
    pub fn new(name: &str) -> Theorem {
        Theorem::with_config(name, ProofConfig::default())
    }

    pub fn with_config(name: &str, config: ProofConfig) -> Theorem {
        Theorem {
            name: name.to_string(),
            config,
            scope: Scope::new(),
            premises: vec![],
            steps: vec![],
            result: None,
            state: ProofState::Building,
        }
    }

    pub fn state(&self) -> ProofState {
        self.state
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// The scope that gates this theorem's rules.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn current_depth(&self) -> Depth {
        self.scope.current_depth()
    }

    fn ensure_building(&self) -> Result<(), ProofError> {
        match self.state {
            ProofState::Building => Ok(()),
            ProofState::Sealed => Err(ProofError::Sealed(self.name.clone())),
            ProofState::Aborted => Err(ProofError::Aborted(self.name.clone())),
        }
    }

    fn abort(&mut self, error: ProofError) -> ProofError {
        warn!(theorem = %self.name, error = %error, "aborted proof");
        self.state = ProofState::Aborted;
        error
    }

    fn record(&mut self, predicate: &Predicate, justification: Justification) {
        self.steps.push(ProofStep {
            predicate: predicate.clone(),
            depth: self.scope.current_depth(),
            justification,
        });
    }

    /// Takes a premise as given, making it valid at the current depth without opening a scope.
    pub fn premise(&mut self, premise: Predicate) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        self.scope.promote(&premise, self.scope.current_depth());
        self.premises.push(premise.clone());
        self.record(&premise, Justification::Premise);
        Ok(premise)
    }

    /// Opens a scope with this predicate as its hypothesis.
    pub fn assume(&mut self, hypothesis: Predicate) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        if let Some(max_depth) = self.config.max_depth {
            if self.scope.current_depth() >= max_depth {
                return Err(ProofError::TooDeep { max_depth });
            }
        }
        self.scope.open_scope(&hypothesis);
        self.record(&hypothesis, Justification::Assumption);
        Ok(hypothesis)
    }

    /// Records a predicate that was derived outside the theorem.
    /// If it is not valid here, the theorem is aborted.
    pub fn next_step(&mut self, step: Predicate) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        if !self.scope.is_valid(&step) {
            return Err(self.abort(ProofError::UnverifiedStep(step.to_string())));
        }
        self.record(&step, Justification::Step);
        Ok(step)
    }

    /// Applies an inference rule in this theorem's scope and records the result.
    /// A rule that refuses leaves the theorem as it was.
    pub fn derive(&mut self, inference: Inference) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        let result = inference.apply(&mut self.scope)?;
        self.record(&result, Justification::Rule(inference.rule()));
        Ok(result)
    }

    /// Uses a sealed axiom or theorem as a derived rule.
    ///
    /// The rule's premises and result are instantiated with the substitution. Each
    /// instantiated premise must be the same formula as the supplied premise in that
    /// position, and every supplied premise must be valid here. The instantiated result
    /// becomes valid at the current depth.
    pub fn cite(
        &mut self,
        rule: &dyn Rule,
        substitution: &[(Variable, Variable)],
        premises: &[Predicate],
    ) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        let Some(result) = rule.result() else {
            return Err(ProofError::LemmaNotSealed(rule.name().to_string()));
        };
        if self.config.strict && rule.is_axiom() {
            return Err(ProofError::AxiomForbidden(rule.name().to_string()));
        }
        if rule.premises().len() != premises.len() {
            return Err(ProofError::LemmaArity {
                name: rule.name().to_string(),
                expected: rule.premises().len(),
                found: premises.len(),
            });
        }
        for (expected, given) in rule.premises().iter().zip(premises) {
            if !self.scope.is_valid(given) {
                return Err(Error::premise_not_verified(CITE, given).into());
            }
            let expected = expected.substitute_all(substitution);
            if !expected.same_formula(given) {
                return Err(Error::structural_inequality(CITE, &expected, given).into());
            }
        }
        let conclusion = result.substitute_all(substitution);
        self.scope.promote(&conclusion, self.scope.current_depth());
        debug!(theorem = %self.name, cited = rule.name(), conclusion = %conclusion, "cited");
        self.record(&conclusion, Justification::Citation(rule.name().to_string()));
        Ok(conclusion)
    }

    /// Seals the theorem. The result must be valid at depth 1 with nothing left open.
    /// If it is not, the theorem is aborted.
    pub fn set_result(&mut self, result: Predicate) -> Result<Predicate, ProofError> {
        self.ensure_building()?;
        if self.scope.is_open() || !self.scope.is_valid(&result) {
            return Err(self.abort(ProofError::IncompleteDischarge {
                depth: self.scope.current_depth(),
                result: result.to_string(),
            }));
        }
        debug!(theorem = %self.name, result = %result, steps = self.steps.len(), "sealed theorem");
        self.result = Some(result.clone());
        self.state = ProofState::Sealed;
        Ok(result)
    }
}

impl Rule for Theorem {
    fn name(&self) -> &str {
        &self.name
    }

    fn premises(&self) -> &[Predicate] {
        &self.premises
    }

    fn result(&self) -> Option<&Predicate> {
        self.result.as_ref()
    }

    fn certificate(&self) -> Option<Certificate> {
        let result = self.result.as_ref()?;
        Some(Certificate::new(
            self.name.clone(),
            render_all(&self.premises),
            result.to_string(),
            self.steps.iter().map(|step| step.to_string()).collect(),
        ))
    }
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_rule(f, self)
    }
}
