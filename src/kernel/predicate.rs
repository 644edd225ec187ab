use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::kernel::variable::Variable;

/// The nesting depth of hypothetical reasoning. The outermost depth is 1.
pub type Depth = u32;

/// The stamp of a predicate that has never been verified.
/// It is larger than any real depth, so an unverified predicate is never valid.
pub const UNVERIFIED: Depth = Depth::MAX;

/// Identifies one opened scope. A generation is never reused, so a stamp taken inside a
/// scope that has since been closed can't match a later scope at the same depth.
pub type Generation = u64;

/// Where a predicate was verified: a depth, and the scope that was open at that depth.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Stamp {
    pub depth: Depth,
    pub generation: Generation,
}

impl Stamp {
    pub const UNVERIFIED: Stamp = Stamp {
        depth: UNVERIFIED,
        generation: 0,
    };
}

/// The shape of a formula.
/// Children are Predicates, so they are shared rather than copied.
#[derive(Debug)]
pub enum Formula {
    /// An n-ary relation over variables, like eq(a, b).
    /// With no operands this is a propositional letter.
    Atomic { name: String, operands: Vec<Variable> },

    Not(Predicate),

    And(Predicate, Predicate),

    Or(Predicate, Predicate),

    Implies(Predicate, Predicate),

    /// The variable is the one the quantifier was built with.
    /// Whether it actually binds anything is answered by `Predicate::binding`.
    ForAll(Variable, Predicate),

    Exists(Variable, Predicate),

    Contradiction,

    Tautology,
}

struct PredicateCell {
    formula: Formula,

    // Every variable occurrence below this node, in source order, duplicates included.
    // Quantifiers keep their bound variable in here.
    free_vars: Vec<Variable>,

    // Where this predicate became a valid proof step.
    // This is the only mutable part of a predicate.
    verified: Cell<Stamp>,
}

/// A node in a formula tree.
///
/// Predicates form an immutable DAG with shared ownership: cloning a Predicate clones the
/// handle, not the tree, and a node may be a child of many parents.
/// The stamp is the exception to immutability. The scope manager changes it in place, and
/// because nodes are shared, the change is visible through every parent.
#[derive(Clone)]
pub struct Predicate(Rc<PredicateCell>);

impl Predicate {
    fn new(formula: Formula, free_vars: Vec<Variable>, verified: Stamp) -> Predicate {
        Predicate(Rc::new(PredicateCell {
            formula,
            free_vars,
            verified: Cell::new(verified),
        }))
    }

    fn concat_vars(left: &Predicate, right: &Predicate) -> Vec<Variable> {
        let mut vars = Vec::with_capacity(left.free_vars().len() + right.free_vars().len());
        vars.extend_from_slice(left.free_vars());
        vars.extend_from_slice(right.free_vars());
        vars
    }

    pub fn atomic(name: &str, operands: &[Variable]) -> Predicate {
        Predicate::new(
            Formula::Atomic {
                name: name.to_string(),
                operands: operands.to_vec(),
            },
            operands.to_vec(),
            Stamp::UNVERIFIED,
        )
    }

    /// A nullary atomic predicate.
    pub fn proposition(name: &str) -> Predicate {
        Predicate::atomic(name, &[])
    }

    /// Negation inherits the stamp of the negated predicate.
    pub fn not(inner: &Predicate) -> Predicate {
        Predicate::new(
            Formula::Not(inner.clone()),
            inner.free_vars().to_vec(),
            inner.verified(),
        )
    }

    pub fn and(left: &Predicate, right: &Predicate) -> Predicate {
        Predicate::new(
            Formula::And(left.clone(), right.clone()),
            Predicate::concat_vars(left, right),
            Stamp::UNVERIFIED,
        )
    }

    pub fn or(left: &Predicate, right: &Predicate) -> Predicate {
        Predicate::new(
            Formula::Or(left.clone(), right.clone()),
            Predicate::concat_vars(left, right),
            Stamp::UNVERIFIED,
        )
    }

    pub fn implies(left: &Predicate, right: &Predicate) -> Predicate {
        Predicate::new(
            Formula::Implies(left.clone(), right.clone()),
            Predicate::concat_vars(left, right),
            Stamp::UNVERIFIED,
        )
    }

    pub fn for_all(variable: &Variable, body: &Predicate) -> Predicate {
        Predicate::new(
            Formula::ForAll(variable.clone(), body.clone()),
            body.free_vars().to_vec(),
            Stamp::UNVERIFIED,
        )
    }

    pub fn exists(variable: &Variable, body: &Predicate) -> Predicate {
        Predicate::new(
            Formula::Exists(variable.clone(), body.clone()),
            body.free_vars().to_vec(),
            Stamp::UNVERIFIED,
        )
    }

    pub fn contradiction() -> Predicate {
        Predicate::new(Formula::Contradiction, vec![], Stamp::UNVERIFIED)
    }

    pub fn tautology() -> Predicate {
        Predicate::new(Formula::Tautology, vec![], Stamp::UNVERIFIED)
    }

    pub fn formula(&self) -> &Formula {
        &self.0.formula
    }

    pub fn free_vars(&self) -> &[Variable] {
        &self.0.free_vars
    }

    pub fn verified(&self) -> Stamp {
        self.0.verified.get()
    }

    pub fn verified_depth(&self) -> Depth {
        self.verified().depth
    }

    /// Replaces the stamp, whatever it was before.
    /// Whether a stamp is still live is up to the scope manager.
    pub(crate) fn stamp(&self, stamp: Stamp) {
        self.0.verified.set(stamp);
    }

    /// Whether two handles point at the very same node.
    pub fn ptr_eq(&self, other: &Predicate) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// For a quantifier, the occurrence of its variable inside the body, if there is one.
    /// A quantifier over a variable that never occurs in its body binds nothing.
    pub fn binding(&self) -> Option<&Variable> {
        match self.formula() {
            Formula::ForAll(v, body) | Formula::Exists(v, body) => {
                body.free_vars().iter().rfind(|occurrence| *occurrence == v)
            }
            _ => None,
        }
    }

    pub fn as_not(&self) -> Option<&Predicate> {
        match self.formula() {
            Formula::Not(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_and(&self) -> Option<(&Predicate, &Predicate)> {
        match self.formula() {
            Formula::And(left, right) => Some((left, right)),
            _ => None,
        }
    }

    pub fn as_or(&self) -> Option<(&Predicate, &Predicate)> {
        match self.formula() {
            Formula::Or(left, right) => Some((left, right)),
            _ => None,
        }
    }

    pub fn as_implies(&self) -> Option<(&Predicate, &Predicate)> {
        match self.formula() {
            Formula::Implies(left, right) => Some((left, right)),
            _ => None,
        }
    }

    pub fn as_for_all(&self) -> Option<(&Variable, &Predicate)> {
        match self.formula() {
            Formula::ForAll(v, body) => Some((v, body)),
            _ => None,
        }
    }

    pub fn is_contradiction(&self) -> bool {
        matches!(self.formula(), Formula::Contradiction)
    }

    /// Structural equality. Stamps are ignored and variables compare by name.
    pub fn same_formula(&self, other: &Predicate) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.formula(), other.formula()) {
            (
                Formula::Atomic { name, operands },
                Formula::Atomic {
                    name: other_name,
                    operands: other_operands,
                },
            ) => name == other_name && operands == other_operands,
            (Formula::Not(a), Formula::Not(b)) => a.same_formula(b),
            (Formula::And(a1, a2), Formula::And(b1, b2))
            | (Formula::Or(a1, a2), Formula::Or(b1, b2))
            | (Formula::Implies(a1, a2), Formula::Implies(b1, b2)) => {
                a1.same_formula(b1) && a2.same_formula(b2)
            }
            (Formula::ForAll(v, a), Formula::ForAll(w, b))
            | (Formula::Exists(v, a), Formula::Exists(w, b)) => v == w && a.same_formula(b),
            (Formula::Contradiction, Formula::Contradiction) => true,
            (Formula::Tautology, Formula::Tautology) => true,
            _ => false,
        }
    }

    /// Whether the variable occurs somewhere in this predicate outside the reach of a
    /// quantifier over the same name.
    pub fn occurs_free(&self, variable: &Variable) -> bool {
        match self.formula() {
            Formula::Atomic { operands, .. } => operands.contains(variable),
            Formula::Not(inner) => inner.occurs_free(variable),
            Formula::And(left, right)
            | Formula::Or(left, right)
            | Formula::Implies(left, right) => {
                left.occurs_free(variable) || right.occurs_free(variable)
            }
            Formula::ForAll(v, body) | Formula::Exists(v, body) => {
                v != variable && body.occurs_free(variable)
            }
            Formula::Contradiction | Formula::Tautology => false,
        }
    }

    /// Replaces every free occurrence of `from` with `to`, throughout the whole tree.
    ///
    /// The result is a fresh, unverified tree; `self` is untouched.
    /// Quantifiers that rebind `from` shield their bodies. A quantifier over `to` whose body
    /// mentions `from` is renamed first, so `to` is never captured.
    pub fn substitute(&self, from: &Variable, to: &Variable) -> Predicate {
        self.substitute_all(&[(from.clone(), to.clone())])
    }

    /// Simultaneous substitution: each `(from, to)` pair is applied to the original
    /// occurrences only, so a pair never rewrites the output of another pair.
    /// When two pairs share a `from`, the first wins.
    pub fn substitute_all(&self, pairs: &[(Variable, Variable)]) -> Predicate {
        match self.formula() {
            Formula::Atomic { name, operands } => {
                let operands: Vec<Variable> = operands
                    .iter()
                    .map(|v| match pairs.iter().find(|(from, _)| from == v) {
                        Some((_, to)) => to.clone(),
                        None => v.clone(),
                    })
                    .collect();
                Predicate::atomic(name, &operands)
            }
            Formula::Not(inner) => Predicate::not_unstamped(&inner.substitute_all(pairs)),
            Formula::And(left, right) => {
                Predicate::and(&left.substitute_all(pairs), &right.substitute_all(pairs))
            }
            Formula::Or(left, right) => {
                Predicate::or(&left.substitute_all(pairs), &right.substitute_all(pairs))
            }
            Formula::Implies(left, right) => {
                Predicate::implies(&left.substitute_all(pairs), &right.substitute_all(pairs))
            }
            Formula::ForAll(v, body) => {
                let (v, body) = Predicate::substitute_under_binder(v, body, pairs);
                Predicate::for_all(&v, &body)
            }
            Formula::Exists(v, body) => {
                let (v, body) = Predicate::substitute_under_binder(v, body, pairs);
                Predicate::exists(&v, &body)
            }
            Formula::Contradiction => Predicate::contradiction(),
            Formula::Tautology => Predicate::tautology(),
        }
    }

    fn substitute_under_binder(
        bound: &Variable,
        body: &Predicate,
        pairs: &[(Variable, Variable)],
    ) -> (Variable, Predicate) {
        // The binder shields its body from substitutions of its own name.
        let active: Vec<(Variable, Variable)> = pairs
            .iter()
            .filter(|(from, _)| from != bound && body.occurs_free(from))
            .cloned()
            .collect();
        let captures = active.iter().any(|(_, to)| to == bound);
        if !captures {
            return (bound.clone(), body.substitute_all(&active));
        }
        let fresh = Predicate::fresh_variable(bound, body, &active);
        let mut renamed = active;
        renamed.push((bound.clone(), fresh.clone()));
        (fresh, body.substitute_all(&renamed))
    }

    // Primes the name until it collides with nothing in sight.
    fn fresh_variable(
        base: &Variable,
        body: &Predicate,
        pairs: &[(Variable, Variable)],
    ) -> Variable {
        let mut name = format!("{}'", base.name());
        loop {
            let candidate = Variable::new(&name);
            let taken = body.free_vars().contains(&candidate)
                || pairs
                    .iter()
                    .any(|(from, to)| *from == candidate || *to == candidate);
            if !taken {
                return candidate;
            }
            name.push('\'');
        }
    }

    // Substitution produces a fresh tree, so a negation must not pick up a stamp there.
    fn not_unstamped(inner: &Predicate) -> Predicate {
        let negation = Predicate::not(inner);
        negation.stamp(Stamp::UNVERIFIED);
        negation
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Predicate) -> bool {
        self.same_formula(other)
    }
}

impl Eq for Predicate {}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("Predicate");
        debug.field("formula", &self.to_string());
        match self.verified_depth() {
            UNVERIFIED => debug.field("verified", &"no"),
            depth => debug.field("verified", &depth),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(depth: Depth) -> Stamp {
        Stamp {
            depth,
            generation: 0,
        }
    }

    fn vars(names: &[&str]) -> Vec<Variable> {
        names.iter().map(|n| Variable::new(n)).collect()
    }

    #[test]
    fn test_free_vars_keep_duplicates_in_order() {
        let v = vars(&["a", "b", "c"]);
        let eq_ab = Predicate::atomic("eq", &[v[0].clone(), v[1].clone()]);
        let eq_ba = Predicate::atomic("eq", &[v[1].clone(), v[0].clone()]);
        let both = Predicate::and(&eq_ab, &Predicate::not(&eq_ba));
        assert_eq!(both.free_vars(), &vars(&["a", "b", "b", "a"])[..]);

        let quantified = Predicate::for_all(&v[0], &both);
        assert_eq!(quantified.free_vars(), both.free_vars());
        assert!(Predicate::contradiction().free_vars().is_empty());
    }

    #[test]
    fn test_children_are_shared() {
        let p = Predicate::proposition("P");
        let q = Predicate::proposition("Q");
        let conj = Predicate::and(&p, &q);
        let (left, _) = conj.as_and().unwrap();
        assert!(left.ptr_eq(&p));
        left.stamp(at(2));
        assert_eq!(p.verified_depth(), 2);
    }

    #[test]
    fn test_new_predicates_are_unverified() {
        let p = Predicate::proposition("P");
        assert_eq!(p.verified_depth(), UNVERIFIED);
        assert_eq!(Predicate::contradiction().verified(), Stamp::UNVERIFIED);
        assert_eq!(Predicate::or(&p, &p).verified(), Stamp::UNVERIFIED);
    }

    #[test]
    fn test_not_inherits_stamp() {
        let p = Predicate::proposition("P");
        p.stamp(at(1));
        assert_eq!(Predicate::not(&p).verified_depth(), 1);
        let q = Predicate::proposition("Q");
        assert_eq!(Predicate::not(&q).verified_depth(), UNVERIFIED);
    }

    #[test]
    fn test_structural_equality_ignores_identity_and_stamps() {
        let a = Variable::new("a");
        let left = Predicate::not(&Predicate::atomic("nat", &[a.clone()]));
        let right = Predicate::not(&Predicate::atomic("nat", &[Variable::new("a")]));
        right.stamp(at(1));
        assert_eq!(left, right);
        assert_ne!(left, Predicate::not(&Predicate::atomic("nat", &[Variable::new("b")])));
        assert_ne!(
            Predicate::and(&left, &right),
            Predicate::or(&left.clone(), &right.clone())
        );
        assert_ne!(
            Predicate::for_all(&a, &left),
            Predicate::exists(&a, &left)
        );
    }

    #[test]
    fn test_binding_by_name() {
        let p = Predicate::atomic("nat", &[Variable::new("a")]);
        let bound = Predicate::for_all(&Variable::new("a"), &p);
        assert_eq!(bound.binding(), Some(&Variable::new("a")));
        let exists = Predicate::exists(&Variable::new("a"), &p);
        assert_eq!(exists.binding(), Some(&Variable::new("a")));
        let vacuous = Predicate::for_all(&Variable::new("z"), &p);
        assert_eq!(vacuous.binding(), None);
    }

    #[test]
    fn test_substitute_reaches_nested_atoms() {
        let v = vars(&["a", "b", "t"]);
        let body = Predicate::implies(
            &Predicate::atomic("succ", &[v[0].clone(), v[1].clone()]),
            &Predicate::not(&Predicate::atomic("nat", &[v[0].clone()])),
        );
        let result = body.substitute(&v[0], &v[2]);
        assert_eq!(result.to_string(), "(succ(t, b) -> NOT (nat(t)))");
        assert_eq!(result.free_vars(), &vars(&["t", "b", "t"])[..]);
        // The original is untouched.
        assert_eq!(body.to_string(), "(succ(a, b) -> NOT (nat(a)))");
    }

    #[test]
    fn test_substitute_respects_shadowing() {
        let a = Variable::new("a");
        let inner = Predicate::for_all(&a, &Predicate::atomic("nat", &[a.clone()]));
        let body = Predicate::and(&Predicate::atomic("nat", &[a.clone()]), &inner);
        let result = body.substitute(&a, &Variable::new("t"));
        assert_eq!(result.to_string(), "(nat(t) AND For All a (nat(a)))");
    }

    #[test]
    fn test_substitute_avoids_capture() {
        let a = Variable::new("a");
        let b = Variable::new("b");
        let body = Predicate::exists(&b, &Predicate::atomic("succ", &[a.clone(), b.clone()]));
        let result = body.substitute(&a, &b);
        assert_eq!(result.to_string(), "There Exists b' (succ(b, b'))");
    }

    #[test]
    fn test_substitute_all_is_simultaneous() {
        let a = Variable::new("a");
        let b = Variable::new("b");
        let eq = Predicate::atomic("eq", &[a.clone(), b.clone()]);
        let swapped = eq.substitute_all(&[(a.clone(), b.clone()), (b.clone(), a.clone())]);
        assert_eq!(swapped.to_string(), "eq(b, a)");
    }

    #[test]
    fn test_substitute_result_is_unverified() {
        let p = Predicate::proposition("P");
        p.stamp(at(1));
        let negation = Predicate::not(&p);
        let copy = negation.substitute(&Variable::new("x"), &Variable::new("y"));
        assert_eq!(copy.verified_depth(), UNVERIFIED);
        assert_eq!(copy, negation);
    }
}
