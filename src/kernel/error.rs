use std::fmt;

use crate::kernel::predicate::Predicate;

/// Why an inference rule refused to fire.
/// Rule failures are local: nothing is stamped or discharged when a rule returns one of these.
/// Predicates are carried in rendered form so the error outlives the proof it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    // A premise is not valid at the current depth.
    PremiseNotVerified {
        rule: &'static str,
        premise: String,
    },

    // A premise has the wrong variant for the rule.
    ShapeMismatch {
        rule: &'static str,
        expected: &'static str,
        found: String,
    },

    // Two predicates the rule needs to be the same formula are different.
    StructuralInequality {
        rule: &'static str,
        left: String,
        right: String,
    },

    // A discharge with no matching open hypothesis.
    ScopeUnderflow(String),
}

impl Error {
    pub fn premise_not_verified(rule: &'static str, premise: &Predicate) -> Error {
        Error::PremiseNotVerified {
            rule,
            premise: premise.to_string(),
        }
    }

    pub fn shape_mismatch(rule: &'static str, expected: &'static str, found: &Predicate) -> Error {
        Error::ShapeMismatch {
            rule,
            expected,
            found: found.to_string(),
        }
    }

    pub fn structural_inequality(rule: &'static str, left: &Predicate, right: &Predicate) -> Error {
        Error::StructuralInequality {
            rule,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    pub fn scope_underflow<T: Into<String>>(message: T) -> Error {
        Error::ScopeUnderflow(message.into())
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            Error::PremiseNotVerified { .. } => "PremiseNotVerified",
            Error::ShapeMismatch { .. } => "ShapeMismatch",
            Error::StructuralInequality { .. } => "StructuralInequality",
            Error::ScopeUnderflow(_) => "ScopeUnderflow",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::PremiseNotVerified { rule, premise } => {
                write!(f, "{}: premise is not verified in this scope: {}", rule, premise)
            }
            Error::ShapeMismatch {
                rule,
                expected,
                found,
            } => {
                write!(f, "{}: expected {}, found {}", rule, expected, found)
            }
            Error::StructuralInequality { rule, left, right } => {
                write!(f, "{}: {} is not the same formula as {}", rule, left, right)
            }
            Error::ScopeUnderflow(message) => write!(f, "scope underflow: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.to_string()
    }
}
