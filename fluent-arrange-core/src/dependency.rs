// Type identities and type-erased dependency instances

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// First-class identity of a dependency type.
///
/// Two identities are equal when they describe the same Rust type. The name
/// is only carried for diagnostics.
#[derive(Clone, Copy)]
pub struct DependencyType {
    id: TypeId,
    name: &'static str,
}

impl DependencyType {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, as printed in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this identity describes `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for DependencyType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DependencyType {}

impl Hash for DependencyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DependencyType").field(&self.name).finish()
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value that can be stored in a dependency registry.
///
/// Implemented for every `'static` clonable type. Handles such as
/// `Arc<dyn Trait>` are the usual dependency values.
pub trait Dependency: Any {
    fn as_any(&self) -> &dyn Any;

    /// Identity of the stored value's own type.
    fn dependency_type(&self) -> DependencyType;

    fn clone_instance(&self) -> Instance;
}

impl<T: Any + Clone> Dependency for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dependency_type(&self) -> DependencyType {
        DependencyType::of::<T>()
    }

    fn clone_instance(&self) -> Instance {
        Box::new(self.clone())
    }
}

impl fmt::Debug for dyn Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dependency<{}>", self.dependency_type())
    }
}

/// Type-erased dependency value produced by a mock creation port.
pub type Instance = Box<dyn Dependency>;

/// Erase `value` into an [`Instance`].
pub fn instance<T: Any + Clone>(value: T) -> Instance {
    Box::new(value)
}

/// Access to the concrete value behind a dependency handle.
///
/// Blanket implemented for every sized `'static` type. Declare it as a
/// supertrait of a dependency trait to make `Arc<dyn Trait>` handles
/// narrowable to their concrete type:
///
/// ```
/// use fluent_arrange_core::Concrete;
///
/// trait AccountRepository: Concrete {
///     fn find(&self, id: u32) -> Option<String>;
/// }
/// ```
pub trait Concrete: Any {
    fn concrete_any(&self) -> &dyn Any;

    fn concrete_type(&self) -> DependencyType;
}

impl<T: Any> Concrete for T {
    fn concrete_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type(&self) -> DependencyType {
        DependencyType::of::<T>()
    }
}
