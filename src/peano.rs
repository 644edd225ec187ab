//! The Peano axioms, with addition, stated as axioms over named variables.
//!
//! Variables in an axiom are schematic. Cite an axiom with a substitution to use it
//! for particular variables.

use crate::kernel::{Predicate, Variable};
use crate::proof::{Axiom, Rule};

pub fn is_zero(a: &Variable) -> Predicate {
    Predicate::atomic("isZero", &[a.clone()])
}

pub fn nat(a: &Variable) -> Predicate {
    Predicate::atomic("nat", &[a.clone()])
}

pub fn eq(a: &Variable, b: &Variable) -> Predicate {
    Predicate::atomic("eq", &[a.clone(), b.clone()])
}

/// b is the successor of a.
pub fn succ(a: &Variable, b: &Variable) -> Predicate {
    Predicate::atomic("succ", &[a.clone(), b.clone()])
}

/// a + b = c
pub fn sum(a: &Variable, b: &Variable, c: &Variable) -> Predicate {
    Predicate::atomic("sum", &[a.clone(), b.clone(), c.clone()])
}

/// The property that induction is over.
fn property(a: &Variable) -> Predicate {
    Predicate::atomic("P", &[a.clone()])
}

/// Every axiom in the catalogue, in a fixed order.
pub fn axioms() -> Vec<Axiom> {
    let [a, b, c, d, e, z] = ["a", "b", "c", "d", "e", "z"].map(Variable::new);

    let induction_step = Predicate::for_all(
        &a,
        &Predicate::for_all(
            &b,
            &Predicate::implies(
                &succ(&a, &b),
                &Predicate::implies(&property(&a), &property(&b)),
            ),
        ),
    );

    vec![
        Axiom::sealed("zero_nat", vec![is_zero(&z)], nat(&z)),
        Axiom::sealed("eq_ref", vec![], eq(&a, &a)),
        Axiom::sealed("eq_symm", vec![eq(&a, &b)], eq(&b, &a)),
        Axiom::sealed("eq_trans", vec![eq(&a, &b), eq(&b, &c)], eq(&a, &c)),
        Axiom::sealed("nat_closure", vec![nat(&a), eq(&a, &b)], nat(&b)),
        Axiom::sealed("succ_nat", vec![nat(&a), succ(&a, &b)], nat(&b)),
        Axiom::sealed(
            "succ_inj1",
            vec![eq(&a, &b), succ(&a, &c), succ(&b, &d)],
            eq(&c, &d),
        ),
        Axiom::sealed(
            "succ_inj2",
            vec![eq(&c, &d), succ(&a, &c), succ(&b, &d)],
            eq(&a, &b),
        ),
        Axiom::sealed(
            "zero_not_succ",
            vec![is_zero(&z), nat(&a)],
            Predicate::not(&succ(&a, &z)),
        ),
        Axiom::sealed(
            "induction",
            vec![is_zero(&z), property(&z), induction_step],
            Predicate::for_all(&a, &property(&a)),
        ),
        Axiom::sealed("zero_sum", vec![is_zero(&z), nat(&a)], sum(&a, &z, &a)),
        Axiom::sealed(
            "def_sum",
            vec![sum(&a, &b, &c), succ(&b, &d), succ(&c, &e)],
            sum(&a, &d, &e),
        ),
    ]
}

/// Looks up a single axiom by name.
pub fn axiom(name: &str) -> Option<Axiom> {
    axioms().into_iter().find(|axiom| axiom.name() == name)
}
