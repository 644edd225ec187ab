pub mod display;
pub mod error;
pub mod inference;
pub mod predicate;
pub mod scope;
pub mod variable;

pub use error::Error;
pub use predicate::{Depth, Formula, Generation, Predicate, Stamp, UNVERIFIED};
pub use scope::Scope;
pub use variable::Variable;
