// Legacy arrangement object: read-only dependencies, fresh instance per build

use crate::arrangement::Arrangement;
use crate::constructor::{Constructible, Constructor};
use crate::error::Result;
use crate::logging::debug;
use crate::registry::DependencyRegistry;
use crate::resolver::Resolution;
use std::any::type_name;

/// Arrangement without replacement or caching.
///
/// Dependencies can be read and configured, never swapped. Every call to
/// [`build_sut`](Arrangement::build_sut) constructs a new `T` from the same
/// dependency values.
pub struct ArrangeObject<T> {
    constructor: Constructor<T>,
    dependencies: DependencyRegistry,
}

impl<T: Constructible> ArrangeObject<T> {
    pub fn new(resolution: Resolution<T>) -> Self {
        debug!(
            target_type = type_name::<T>(),
            dependencies = resolution.dependencies.len(),
            "Arrangement object created"
        );
        Self {
            constructor: resolution.constructor,
            dependencies: resolution.dependencies,
        }
    }
}

impl<T: Constructible> Arrangement for ArrangeObject<T> {
    type Target = T;
    type Built<'a>
        = T
    where
        Self: 'a;

    fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    fn build_sut(&self) -> Result<Self::Built<'_>> {
        self.constructor.construct(&self.dependencies)
    }
}

impl<T: Constructible> From<Resolution<T>> for ArrangeObject<T> {
    fn from(resolution: Resolution<T>) -> Self {
        Self::new(resolution)
    }
}

impl<T> std::fmt::Debug for ArrangeObject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrangeObject")
            .field("constructor", &self.constructor)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
