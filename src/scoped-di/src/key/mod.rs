use std::any::{self, TypeId};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

/// A runtime identifier of a type, used as the key of every map inside a
/// [`Container`].
///
/// Two keys are equal iff they denote the same type. Unsized types such as
/// `dyn Trait` or `str` have keys too, which is how interfaces are bound.
///
/// [`Container`]: crate::container::Container
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the [`TypeId`] of the denoted type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the name of the denoted type, as reported by
    /// [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TypeKey({})", self.name)
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}

/// Returns the [`TypeKey`] of `T`.
///
/// # Examples
///
/// ```rust
/// # use scoped_di::key;
/// assert_eq!(key::of::<i32>(), key::of::<i32>());
/// assert_ne!(key::of::<i32>(), key::of::<i64>());
/// assert_eq!(key::of::<str>().name(), "str");
/// ```
pub fn of<T>() -> TypeKey
where
    T: ?Sized + 'static,
{
    TypeKey {
        id: TypeId::of::<T>(),
        name: any::type_name::<T>(),
    }
}
