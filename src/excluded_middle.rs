//! A proof of the law of excluded middle, by double negation.
//!
//!   not (R or not R)            assume
//!     not R                     assume
//!     R or not R                or-intro-right
//!     contradiction             contradiction-intro
//!   not not R                   negation-intro
//!   R                           double-negation-elim
//!   R or not R                  or-intro-left
//!   contradiction               contradiction-intro
//! not not (R or not R)          negation-intro
//! R or not R                    double-negation-elim

use tracing::info;

use crate::kernel::Predicate;
use crate::proof::{ProofConfig, ProofError, Theorem};
use crate::proof_step::Inference;

pub const NAME: &str = "excluded_middle";

/// Proves `R or not R` for the propositional letter `R`.
pub fn prove(config: ProofConfig) -> Result<Theorem, ProofError> {
    let mut theorem = Theorem::with_config(NAME, config);

    let r = Predicate::proposition("R");
    let not_r = Predicate::not(&r);

    let p1 = theorem.assume(Predicate::not(&Predicate::or(&r, &not_r)))?;

    let p2 = theorem.assume(not_r.clone())?;
    let p3 = theorem.derive(Inference::OrIntroRight(r.clone(), not_r.clone()))?;
    let p4 = theorem.derive(Inference::ContradictionIntro(p3, p1.clone()))?;

    let p5 = theorem.derive(Inference::NegationIntro(p2, p4))?;
    let p6 = theorem.derive(Inference::DoubleNegationElim(p5))?;
    let p7 = theorem.derive(Inference::OrIntroLeft(p6, not_r))?;
    let p8 = theorem.derive(Inference::ContradictionIntro(p7, p1.clone()))?;

    let p9 = theorem.derive(Inference::NegationIntro(p1, p8))?;
    let p10 = theorem.derive(Inference::DoubleNegationElim(p9))?;
    theorem.set_result(p10)?;

    info!(theorem = NAME, steps = theorem.steps().len(), "proved");
    Ok(theorem)
}
