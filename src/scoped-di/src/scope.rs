use std::fmt::{Display, Formatter, Result as FmtResult};

/// The lifetime policy attached to every registration and every constructed
/// object of a [`Container`].
///
/// The policy decides two things: whether repeated resolutions share one
/// object, and how entries are carried into a scope created by
/// [`Container::create_scope`].
///
/// - A [`Scope::Local`] factory is copied into child scopes, so each scope
///   builds its own object on demand. A [`Scope::Local`] object is never
///   copied, hence never shared across scopes.
/// - A [`Scope::Singleton`] object is shared with every scope created
///   afterwards. Its factory is not copied, since building it again would
///   break the identity of the singleton.
///
/// [`Container`]: crate::container::Container
/// [`Container::create_scope`]: crate::container::Container::create_scope
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Local,
    Singleton,
}

impl Scope {
    /// Returns true if factories of this scope are copied into child scopes.
    pub fn propagates_factory(self) -> bool {
        self == Self::Local
    }

    /// Returns true if objects of this scope are shared with child scopes.
    pub fn propagates_instance(self) -> bool {
        self == Self::Singleton
    }

    /// Returns the name of the scope in a string literal.
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Singleton => "Singleton",
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}
