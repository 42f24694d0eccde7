use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::key::TypeKey;

/// One parameter of a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dependency {
    key: TypeKey,
    optional: bool,
}

impl Dependency {
    /// A parameter which must be resolved, or the construction fails.
    pub fn required(key: TypeKey) -> Self {
        Self {
            key,
            optional: false,
        }
    }

    /// A parameter which receives nothing if it can't be resolved.
    pub fn optional(key: TypeKey) -> Self {
        Self {
            key,
            optional: true,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl Display for Dependency {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.optional {
            write!(f, "Option<{}>", self.key)
        } else {
            write!(f, "{}", self.key)
        }
    }
}

/// The ordered parameter list of a constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    parameters: Vec<Dependency>,
}

impl Signature {
    pub fn new(parameters: Vec<Dependency>) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &[Dependency] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")
    }
}

impl FromIterator<Dependency> for Signature {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
