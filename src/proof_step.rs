use std::fmt;

use crate::kernel::inference;
use crate::kernel::{Depth, Error, Predicate, Scope, Variable};

/// A single application of an inference rule, together with its inputs.
/// This lets a proof record which rule produced each step.
#[derive(Clone, Debug)]
pub enum Inference {
    AndIntro(Predicate, Predicate),
    AndElimLeft(Predicate),
    AndElimRight(Predicate),
    OrIntroLeft(Predicate, Predicate),
    OrIntroRight(Predicate, Predicate),

    /// The disjunction, then the two implications.
    OrElim(Predicate, Predicate, Predicate),

    DoubleNegationElim(Predicate),
    ImpliesElim(Predicate),

    /// The hypothesis, then what was derived from it.
    ImpliesIntro(Predicate, Predicate),

    /// The hypothesis, then the contradiction derived from it.
    NegationIntro(Predicate, Predicate),

    /// The contradiction, then the predicate to conclude.
    ContradictionElim(Predicate, Predicate),

    /// The predicate, then its negation.
    ContradictionIntro(Predicate, Predicate),

    UniversalInstantiation(Predicate, Variable),

    ExistsIntro {
        premise: Predicate,
        template: Predicate,
        variable: Variable,
        witness: Variable,
    },

    TautologyIntro,
}

impl Inference {
    pub fn rule(&self) -> &'static str {
        match self {
            Inference::AndIntro(..) => inference::AND_INTRO,
            Inference::AndElimLeft(_) => inference::AND_ELIM_LEFT,
            Inference::AndElimRight(_) => inference::AND_ELIM_RIGHT,
            Inference::OrIntroLeft(..) => inference::OR_INTRO_LEFT,
            Inference::OrIntroRight(..) => inference::OR_INTRO_RIGHT,
            Inference::OrElim(..) => inference::OR_ELIM,
            Inference::DoubleNegationElim(_) => inference::DOUBLE_NEGATION_ELIM,
            Inference::ImpliesElim(_) => inference::IMPLIES_ELIM,
            Inference::ImpliesIntro(..) => inference::IMPLIES_INTRO,
            Inference::NegationIntro(..) => inference::NEGATION_INTRO,
            Inference::ContradictionElim(..) => inference::CONTRADICTION_ELIM,
            Inference::ContradictionIntro(..) => inference::CONTRADICTION_INTRO,
            Inference::UniversalInstantiation(..) => inference::UNIVERSAL_INSTANTIATION,
            Inference::ExistsIntro { .. } => inference::EXISTS_INTRO,
            Inference::TautologyIntro => inference::TAUTOLOGY_INTRO,
        }
    }

    /// Whether applying this inference closes a scope.
    pub fn discharges(&self) -> bool {
        matches!(
            self,
            Inference::ImpliesIntro(..) | Inference::NegationIntro(..)
        )
    }

    pub fn apply(&self, scope: &mut Scope) -> Result<Predicate, Error> {
        match self {
            Inference::AndIntro(p, q) => inference::and_intro(scope, p, q),
            Inference::AndElimLeft(c) => inference::and_elim_left(scope, c),
            Inference::AndElimRight(c) => inference::and_elim_right(scope, c),
            Inference::OrIntroLeft(p, q) => inference::or_intro_left(scope, p, q),
            Inference::OrIntroRight(p, q) => inference::or_intro_right(scope, p, q),
            Inference::OrElim(c, r1, r2) => inference::or_elim(scope, c, r1, r2),
            Inference::DoubleNegationElim(c) => inference::double_negation_elim(scope, c),
            Inference::ImpliesElim(c) => inference::implies_elim(scope, c),
            Inference::ImpliesIntro(p, q) => inference::implies_intro(scope, p, q),
            Inference::NegationIntro(p, c) => inference::negation_intro(scope, p, c),
            Inference::ContradictionElim(c, p) => inference::contradiction_elim(scope, c, p),
            Inference::ContradictionIntro(p, n) => inference::contradiction_intro(scope, p, n),
            Inference::UniversalInstantiation(c, target) => {
                inference::universal_instantiation(scope, c, target)
            }
            Inference::ExistsIntro {
                premise,
                template,
                variable,
                witness,
            } => inference::exists_intro(scope, premise, template, variable, witness),
            Inference::TautologyIntro => Ok(inference::tautology_intro(scope)),
        }
    }
}

/// How a step of a proof is justified.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Justification {
    /// Given to the proof from outside, without an open scope.
    Premise,

    /// Assumed, opening a scope.
    Assumption,

    /// Produced by an inference rule applied through the proof.
    Rule(&'static str),

    /// Produced by citing a sealed axiom or theorem by name.
    Citation(String),

    /// Produced elsewhere and handed to the proof already verified.
    Step,
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Justification::Premise => write!(f, "premise"),
            Justification::Assumption => write!(f, "assume"),
            Justification::Rule(rule) => write!(f, "{}", rule),
            Justification::Citation(name) => write!(f, "by {}", name),
            Justification::Step => write!(f, "step"),
        }
    }
}

/// A recorded step of a proof.
#[derive(Clone, Debug)]
pub struct ProofStep {
    pub predicate: Predicate,

    /// The scope depth when the step was recorded.
    pub depth: Depth,

    pub justification: Justification,
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.depth, self.justification, self.predicate)
    }
}
