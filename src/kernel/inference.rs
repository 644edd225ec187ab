//! The natural deduction rules.
//!
//! Every rule takes predicates that have already been built, checks them against the
//! scope, and either returns a valid predicate or an error.
//! Introduction rules build new nodes and stamp them. Elimination rules hand back an
//! existing subtree and promote it, which makes it valid everywhere that subtree is shared.
//! A rule that fails has not stamped, promoted, or discharged anything.

use tracing::trace;

use crate::kernel::display::DisplayStamped;
use crate::kernel::error::Error;
use crate::kernel::predicate::{Depth, Predicate};
use crate::kernel::scope::Scope;
use crate::kernel::variable::Variable;

pub const AND_INTRO: &str = "and-intro";
pub const AND_ELIM_LEFT: &str = "and-elim-left";
pub const AND_ELIM_RIGHT: &str = "and-elim-right";
pub const OR_INTRO_LEFT: &str = "or-intro-left";
pub const OR_INTRO_RIGHT: &str = "or-intro-right";
pub const OR_ELIM: &str = "or-elim";
pub const DOUBLE_NEGATION_ELIM: &str = "double-negation-elim";
pub const IMPLIES_ELIM: &str = "implies-elim";
pub const IMPLIES_INTRO: &str = "implies-intro";
pub const NEGATION_INTRO: &str = "negation-intro";
pub const CONTRADICTION_ELIM: &str = "contradiction-elim";
pub const CONTRADICTION_INTRO: &str = "contradiction-intro";
pub const UNIVERSAL_INSTANTIATION: &str = "universal-instantiation";
pub const EXISTS_INTRO: &str = "exists-intro";
pub const TAUTOLOGY_INTRO: &str = "tautology-intro";

fn require_valid(scope: &Scope, rule: &'static str, premise: &Predicate) -> Result<(), Error> {
    if scope.is_valid(premise) {
        Ok(())
    } else {
        Err(Error::premise_not_verified(rule, premise))
    }
}

fn require_same(rule: &'static str, left: &Predicate, right: &Predicate) -> Result<(), Error> {
    if left.same_formula(right) {
        Ok(())
    } else {
        Err(Error::structural_inequality(rule, left, right))
    }
}

// Stamps a freshly built node.
fn introduce(scope: &Scope, rule: &'static str, result: Predicate, depth: Depth) -> Predicate {
    scope.stamp(&result, depth);
    let stamped = DisplayStamped { predicate: &result };
    trace!(rule, result = %stamped, "introduced");
    result
}

// Promotes an existing node.
fn eliminate(scope: &Scope, rule: &'static str, result: &Predicate, depth: Depth) -> Predicate {
    scope.promote(result, depth);
    let stamped = DisplayStamped { predicate: result };
    trace!(rule, result = %stamped, "eliminated");
    result.clone()
}

/// p, q |- p and q
pub fn and_intro(scope: &Scope, p: &Predicate, q: &Predicate) -> Result<Predicate, Error> {
    require_valid(scope, AND_INTRO, p)?;
    require_valid(scope, AND_INTRO, q)?;
    Ok(introduce(
        scope,
        AND_INTRO,
        Predicate::and(p, q),
        scope.current_depth(),
    ))
}

/// p and q |- p
pub fn and_elim_left(scope: &Scope, c: &Predicate) -> Result<Predicate, Error> {
    let (left, _) = c
        .as_and()
        .ok_or_else(|| Error::shape_mismatch(AND_ELIM_LEFT, "AND", c))?;
    require_valid(scope, AND_ELIM_LEFT, c)?;
    Ok(eliminate(scope, AND_ELIM_LEFT, left, c.verified_depth()))
}

/// p and q |- q
pub fn and_elim_right(scope: &Scope, c: &Predicate) -> Result<Predicate, Error> {
    let (_, right) = c
        .as_and()
        .ok_or_else(|| Error::shape_mismatch(AND_ELIM_RIGHT, "AND", c))?;
    require_valid(scope, AND_ELIM_RIGHT, c)?;
    Ok(eliminate(scope, AND_ELIM_RIGHT, right, c.verified_depth()))
}

/// p |- p or q
pub fn or_intro_left(scope: &Scope, p: &Predicate, q: &Predicate) -> Result<Predicate, Error> {
    require_valid(scope, OR_INTRO_LEFT, p)?;
    Ok(introduce(
        scope,
        OR_INTRO_LEFT,
        Predicate::or(p, q),
        scope.current_depth(),
    ))
}

/// q |- p or q
pub fn or_intro_right(scope: &Scope, p: &Predicate, q: &Predicate) -> Result<Predicate, Error> {
    require_valid(scope, OR_INTRO_RIGHT, q)?;
    Ok(introduce(
        scope,
        OR_INTRO_RIGHT,
        Predicate::or(p, q),
        scope.current_depth(),
    ))
}

/// p or q, p -> r, q -> r |- r
pub fn or_elim(
    scope: &Scope,
    c: &Predicate,
    r1: &Predicate,
    r2: &Predicate,
) -> Result<Predicate, Error> {
    let (p, q) = c
        .as_or()
        .ok_or_else(|| Error::shape_mismatch(OR_ELIM, "OR", c))?;
    let (p1, r) = r1
        .as_implies()
        .ok_or_else(|| Error::shape_mismatch(OR_ELIM, "IMPLIES", r1))?;
    let (q2, r_other) = r2
        .as_implies()
        .ok_or_else(|| Error::shape_mismatch(OR_ELIM, "IMPLIES", r2))?;
    require_valid(scope, OR_ELIM, c)?;
    require_valid(scope, OR_ELIM, r1)?;
    require_valid(scope, OR_ELIM, r2)?;
    require_same(OR_ELIM, p1, p)?;
    require_same(OR_ELIM, q2, q)?;
    require_same(OR_ELIM, r, r_other)?;
    Ok(eliminate(scope, OR_ELIM, r, scope.current_depth()))
}

/// not not p |- p
pub fn double_negation_elim(scope: &Scope, c: &Predicate) -> Result<Predicate, Error> {
    let inner = c
        .as_not()
        .and_then(|n| n.as_not())
        .ok_or_else(|| Error::shape_mismatch(DOUBLE_NEGATION_ELIM, "NOT (NOT (...))", c))?;
    require_valid(scope, DOUBLE_NEGATION_ELIM, c)?;
    Ok(eliminate(scope, DOUBLE_NEGATION_ELIM, inner, c.verified_depth()))
}

/// p -> q, p |- q
pub fn implies_elim(scope: &Scope, c: &Predicate) -> Result<Predicate, Error> {
    let (p, q) = c
        .as_implies()
        .ok_or_else(|| Error::shape_mismatch(IMPLIES_ELIM, "IMPLIES", c))?;
    require_valid(scope, IMPLIES_ELIM, c)?;
    require_valid(scope, IMPLIES_ELIM, p)?;
    Ok(eliminate(scope, IMPLIES_ELIM, q, scope.current_depth()))
}

/// Discharges the hypothesis p, under which q is valid, giving p -> q.
/// Closes the innermost scope.
pub fn implies_intro(scope: &mut Scope, p: &Predicate, q: &Predicate) -> Result<Predicate, Error> {
    scope.check_discharge(IMPLIES_INTRO, p)?;
    require_valid(scope, IMPLIES_INTRO, q)?;
    scope.close_scope()?;
    Ok(introduce(
        scope,
        IMPLIES_INTRO,
        Predicate::implies(p, q),
        scope.current_depth(),
    ))
}

/// Discharges the hypothesis p, under which a contradiction is valid, giving not p.
/// Closes the innermost scope.
pub fn negation_intro(scope: &mut Scope, p: &Predicate, c: &Predicate) -> Result<Predicate, Error> {
    if !c.is_contradiction() {
        return Err(Error::shape_mismatch(NEGATION_INTRO, "CONTRA", c));
    }
    scope.check_discharge(NEGATION_INTRO, p)?;
    require_valid(scope, NEGATION_INTRO, c)?;
    scope.close_scope()?;
    Ok(introduce(
        scope,
        NEGATION_INTRO,
        Predicate::not(p),
        scope.current_depth(),
    ))
}

/// contradiction |- p
pub fn contradiction_elim(scope: &Scope, c: &Predicate, p: &Predicate) -> Result<Predicate, Error> {
    if !c.is_contradiction() {
        return Err(Error::shape_mismatch(CONTRADICTION_ELIM, "CONTRA", c));
    }
    require_valid(scope, CONTRADICTION_ELIM, c)?;
    Ok(eliminate(scope, CONTRADICTION_ELIM, p, scope.current_depth()))
}

/// p, not p |- contradiction
pub fn contradiction_intro(scope: &Scope, p: &Predicate, n: &Predicate) -> Result<Predicate, Error> {
    let negated = n
        .as_not()
        .ok_or_else(|| Error::shape_mismatch(CONTRADICTION_INTRO, "NOT", n))?;
    require_valid(scope, CONTRADICTION_INTRO, p)?;
    require_valid(scope, CONTRADICTION_INTRO, n)?;
    require_same(CONTRADICTION_INTRO, negated, p)?;
    Ok(introduce(
        scope,
        CONTRADICTION_INTRO,
        Predicate::contradiction(),
        scope.current_depth(),
    ))
}

/// for all x, p(x) |- p(t)
///
/// The result is a fresh copy of the body, stamped where the quantifier was.
pub fn universal_instantiation(
    scope: &Scope,
    c: &Predicate,
    target: &Variable,
) -> Result<Predicate, Error> {
    let (bound, body) = c
        .as_for_all()
        .ok_or_else(|| Error::shape_mismatch(UNIVERSAL_INSTANTIATION, "FOR ALL", c))?;
    require_valid(scope, UNIVERSAL_INSTANTIATION, c)?;
    let instance = body.substitute(bound, target);
    Ok(introduce(
        scope,
        UNIVERSAL_INSTANTIATION,
        instance,
        c.verified_depth(),
    ))
}

/// p(t) |- there exists x, p(x)
///
/// `template` is the body of the new quantifier. It must turn into `p` when `variable`
/// is replaced by `witness`.
pub fn exists_intro(
    scope: &Scope,
    p: &Predicate,
    template: &Predicate,
    variable: &Variable,
    witness: &Variable,
) -> Result<Predicate, Error> {
    require_valid(scope, EXISTS_INTRO, p)?;
    let instance = template.substitute(variable, witness);
    require_same(EXISTS_INTRO, &instance, p)?;
    Ok(introduce(
        scope,
        EXISTS_INTRO,
        Predicate::exists(variable, template),
        scope.current_depth(),
    ))
}

/// |- true
pub fn tautology_intro(scope: &Scope) -> Predicate {
    introduce(
        scope,
        TAUTOLOGY_INTRO,
        Predicate::tautology(),
        scope.current_depth(),
    )
}
