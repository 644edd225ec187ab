use std::fmt;
use std::rc::Rc;

/// A Variable is an opaque named symbol.
/// Two variables are the same variable exactly when their names match, so a variable
/// built twice from the same name is interchangeable with the original.
/// Cloning is cheap; the name is shared.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    name: Rc<str>,
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Variable::new(name)
    }
}
