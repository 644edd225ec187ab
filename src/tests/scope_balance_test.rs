use crate::kernel::{inference, Predicate, Scope};
use crate::proof::{ProofState, Rule, Theorem};
use crate::proof_step::Inference;

#[test]
fn test_nested_discharge_order() {
    let mut theorem = Theorem::new("pairing");
    let p = theorem.assume(Predicate::proposition("P")).unwrap();
    let q = theorem.assume(Predicate::proposition("Q")).unwrap();
    assert_eq!(theorem.current_depth(), 3);
    let both = theorem
        .derive(Inference::AndIntro(p.clone(), q.clone()))
        .unwrap();

    // The outer hypothesis can't be discharged past the inner one.
    let err = theorem
        .derive(Inference::ImpliesIntro(p.clone(), both.clone()))
        .unwrap_err();
    assert_eq!(err.error_type(), "ScopeUnderflow");
    assert!(!err.is_fatal());
    assert_eq!(theorem.current_depth(), 3);
    assert_eq!(theorem.state(), ProofState::Building);

    let inner = theorem.derive(Inference::ImpliesIntro(q, both)).unwrap();
    assert_eq!(inner.verified_depth(), 2);
    let outer = theorem.derive(Inference::ImpliesIntro(p, inner)).unwrap();
    assert_eq!(outer.to_string(), "(P -> (Q -> (P AND Q)))");
    assert_eq!(theorem.current_depth(), 1);
    theorem.set_result(outer).unwrap();
}

#[test]
fn test_outer_fact_can_be_discharged_into() {
    let mut theorem = Theorem::new("constant");
    let p = theorem.assume(Predicate::proposition("P")).unwrap();
    let q = theorem.assume(Predicate::proposition("Q")).unwrap();
    // P was derived at depth 2 and is still valid at depth 3.
    let inner = theorem
        .derive(Inference::ImpliesIntro(q, p.clone()))
        .unwrap();
    assert_eq!(inner.verified_depth(), 2);
    let outer = theorem.derive(Inference::ImpliesIntro(p, inner)).unwrap();
    assert_eq!(outer.to_string(), "(P -> (Q -> P))");
    theorem.set_result(outer).unwrap();
}

#[test]
fn test_negation_intro_closes_one_scope() {
    let mut theorem = Theorem::new("non_contradiction");
    let p = Predicate::proposition("P");
    let both = theorem
        .assume(Predicate::and(&p, &Predicate::not(&p)))
        .unwrap();
    let left = theorem.derive(Inference::AndElimLeft(both.clone())).unwrap();
    let right = theorem.derive(Inference::AndElimRight(both.clone())).unwrap();
    let contra = theorem
        .derive(Inference::ContradictionIntro(left, right))
        .unwrap();
    assert_eq!(contra.verified_depth(), 2);
    let result = theorem.derive(Inference::NegationIntro(both, contra)).unwrap();
    assert_eq!(result.to_string(), "NOT ((P AND NOT (P)))");
    assert_eq!(theorem.current_depth(), 1);
    theorem.set_result(result).unwrap();
}

#[test]
fn test_hypothesis_goes_stale_after_discharge() {
    let mut theorem = Theorem::new("stale");
    let p = theorem.assume(Predicate::proposition("P")).unwrap();
    theorem
        .derive(Inference::ImpliesIntro(p.clone(), p.clone()))
        .unwrap();
    assert!(!theorem.scope().is_valid(&p));
    let err = theorem.derive(Inference::OrIntroLeft(p.clone(), p)).unwrap_err();
    assert_eq!(err.error_type(), "PremiseNotVerified");
}

#[test]
fn test_reassumed_hypothesis_keeps_its_stamp() {
    let mut scope = Scope::new();
    let p = Predicate::proposition("P");
    scope.open_scope(&p);
    scope.open_scope(&p);
    assert_eq!(p.verified_depth(), 2);
    let imp = inference::implies_intro(&mut scope, &p, &p).unwrap();
    assert_eq!(imp.verified_depth(), 2);
    let outer = inference::implies_intro(&mut scope, &p, &imp).unwrap();
    assert_eq!(outer.to_string(), "(P -> (P -> P))");
    assert_eq!(scope.current_depth(), 1);
}

#[test]
fn test_sibling_scope_does_not_revive_discharged_steps() {
    let mut theorem = Theorem::new("unfounded");
    let p = theorem.assume(Predicate::proposition("P")).unwrap();
    theorem
        .derive(Inference::ImpliesIntro(p.clone(), p.clone()))
        .unwrap();
    let q = theorem.assume(Predicate::proposition("Q")).unwrap();
    assert_eq!(theorem.current_depth(), 2);
    assert_eq!(p.verified_depth(), 2);
    assert!(!theorem.scope().is_valid(&p));

    let err = theorem
        .derive(Inference::ImpliesIntro(q.clone(), p.clone()))
        .unwrap_err();
    assert_eq!(err.error_type(), "PremiseNotVerified");
    let err = theorem
        .derive(Inference::AndIntro(q, p))
        .unwrap_err();
    assert_eq!(err.error_type(), "PremiseNotVerified");
    assert_eq!(theorem.current_depth(), 2);
    assert_eq!(theorem.state(), ProofState::Building);
}

#[test]
fn test_promoted_hypothesis_can_be_discharged() {
    let mut theorem = Theorem::new("promoted");
    let p = Predicate::proposition("P");
    let both = theorem
        .premise(Predicate::and(&p, &Predicate::proposition("Q")))
        .unwrap();
    theorem.assume(p.clone()).unwrap();
    let left = theorem.derive(Inference::AndElimLeft(both)).unwrap();
    assert!(left.ptr_eq(&p));
    assert_eq!(p.verified_depth(), 1);

    let imp = theorem
        .derive(Inference::ImpliesIntro(p.clone(), p.clone()))
        .unwrap();
    assert_eq!(imp.to_string(), "(P -> P)");
    assert_eq!(theorem.current_depth(), 1);
    assert!(theorem.scope().is_valid(&p));
    theorem.set_result(imp).unwrap();
}

#[test]
fn test_assumed_premise_stays_valid_after_discharge() {
    let mut theorem = Theorem::new("premise_again");
    let p = theorem.premise(Predicate::proposition("P")).unwrap();
    theorem.assume(p.clone()).unwrap();
    assert_eq!(p.verified_depth(), 1);
    theorem
        .derive(Inference::ImpliesIntro(p.clone(), p.clone()))
        .unwrap();
    let both = theorem
        .derive(Inference::AndIntro(p.clone(), p))
        .unwrap();
    assert_eq!(both.verified_depth(), 1);
    theorem.set_result(both).unwrap();
}

#[test]
fn test_tautology_is_valid_everywhere_it_is_introduced() {
    let mut theorem = Theorem::new("truth");
    let t = theorem.derive(Inference::TautologyIntro).unwrap();
    assert_eq!(t.to_string(), "TAUT");
    theorem.set_result(t).unwrap();
    assert!(theorem.premises().is_empty());
}
