//! Substitute registry for link-time collection using inventory
//!
//! Each dependency type gets at most one factory, registered anywhere in the
//! test binary with [`substitute!`](crate::substitute). The factory runs every
//! time a substitute of that type is requested, so every arrangement gets its
//! own instance.

use fluent_arrange_core::{DependencyType, Instance, MockBackend, MockResult};
use thiserror::Error;
use tracing::{debug, trace};

/// A substitute factory collected via inventory.
pub struct SubstituteEntry {
    dependency: fn() -> DependencyType,
    create: fn() -> Instance,
}

inventory::collect!(SubstituteEntry);

impl SubstituteEntry {
    pub const fn new(dependency: fn() -> DependencyType, create: fn() -> Instance) -> Self {
        Self { dependency, create }
    }

    /// The dependency type this entry produces.
    pub fn dependency_type(&self) -> DependencyType {
        (self.dependency)()
    }

    /// Run the factory.
    pub fn create(&self) -> Instance {
        (self.create)()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstituteError {
    #[error("No substitute registered for type {0}")]
    NotRegistered(String),

    #[error("More than one substitute registered for type {0}")]
    Ambiguous(String),
}

/// All registered entries for `ty`.
pub fn entries_for(ty: DependencyType) -> Vec<&'static SubstituteEntry> {
    inventory::iter::<SubstituteEntry>
        .into_iter()
        .filter(|entry| entry.dependency_type() == ty)
        .collect()
}

/// Types with a registered substitute.
pub fn registered_types() -> Vec<DependencyType> {
    inventory::iter::<SubstituteEntry>
        .into_iter()
        .map(SubstituteEntry::dependency_type)
        .collect()
}

/// Create a fresh substitute of type `ty`.
///
/// # Errors
///
/// [`SubstituteError::NotRegistered`] when no factory exists for `ty`,
/// [`SubstituteError::Ambiguous`] when several do.
pub fn create_mock(ty: DependencyType) -> Result<Instance, SubstituteError> {
    match entries_for(ty).as_slice() {
        [entry] => {
            trace!(dependency = ty.name(), "Creating registered substitute");
            Ok(entry.create())
        }
        [] => {
            debug!(dependency = ty.name(), "No substitute registered");
            Err(SubstituteError::NotRegistered(ty.name().to_string()))
        }
        entries => {
            debug!(
                dependency = ty.name(),
                registrations = entries.len(),
                "Conflicting substitute registrations"
            );
            Err(SubstituteError::Ambiguous(ty.name().to_string()))
        }
    }
}

/// Mock backend serving substitutes registered with
/// [`substitute!`](crate::substitute).
#[derive(Debug, Clone, Copy, Default)]
pub struct Substitutes;

impl MockBackend for Substitutes {
    fn create_mock(&self, ty: DependencyType) -> MockResult {
        create_mock(ty).map_err(Into::into)
    }
}

/// Register a substitute factory for a dependency type.
///
/// The expression is evaluated once per request, producing a new value each
/// time.
///
/// ```ignore
/// substitute!(Arc<dyn AccountRepository> => Arc::new(FakeAccountRepository::default()));
/// ```
#[macro_export]
macro_rules! substitute {
    ($ty:ty => $factory:expr) => {
        $crate::__private::inventory::submit! {
            $crate::SubstituteEntry::new(
                $crate::__private::DependencyType::of::<$ty>,
                || $crate::__private::instance::<$ty>($factory),
            )
        }
    };
}
