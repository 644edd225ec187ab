use std::fmt;

use crate::kernel::predicate::{Formula, Predicate, UNVERIFIED};

// Rendering is a total fold over the tree. It never looks at stamps.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.formula() {
            Formula::Atomic { name, operands } => {
                write!(f, "{}", name)?;
                if operands.is_empty() {
                    return Ok(());
                }
                write!(f, "(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", operand)?;
                }
                write!(f, ")")
            }
            Formula::Not(inner) => write!(f, "NOT ({})", inner),
            Formula::And(left, right) => write!(f, "({} AND {})", left, right),
            Formula::Or(left, right) => write!(f, "({} OR {})", left, right),
            Formula::Implies(left, right) => write!(f, "({} -> {})", left, right),
            Formula::ForAll(v, body) => write!(f, "For All {} ({})", v, body),
            Formula::Exists(v, body) => write!(f, "There Exists {} ({})", v, body),
            Formula::Contradiction => write!(f, "CONTRA"),
            Formula::Tautology => write!(f, "TAUT"),
        }
    }
}

/// The canonical text of a predicate, for diagnostics.
pub fn render(predicate: &Predicate) -> String {
    predicate.to_string()
}

/// Displays a predicate together with the depth it was verified at.
pub struct DisplayStamped<'a> {
    pub predicate: &'a Predicate,
}

impl fmt::Display for DisplayStamped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.predicate.verified_depth() {
            UNVERIFIED => write!(f, "[-] {}", self.predicate),
            depth => write!(f, "[{}] {}", depth, self.predicate),
        }
    }
}
