use crate::kernel::{Predicate, Variable};
use crate::proof::{Rule, Theorem};
use crate::proof_step::Inference;

pub fn vars<const N: usize>(names: [&str; N]) -> [Variable; N] {
    names.map(Variable::new)
}

/// Proves P -> P by assuming P and discharging it at once.
pub fn identity(name: &str) -> Theorem {
    let mut theorem = Theorem::new(name);
    let p = theorem.assume(Predicate::proposition("P")).unwrap();
    let imp = theorem
        .derive(Inference::ImpliesIntro(p.clone(), p))
        .unwrap();
    theorem.set_result(imp).unwrap();
    theorem
}

/// The proof lines of a sealed theorem's certificate, one per line.
pub fn proof_text(theorem: &Theorem) -> String {
    let cert = theorem.certificate().expect("theorem is not sealed");
    cert.proof.expect("certificate has no proof").join("\n")
}
