// Behaviour shared by every arrangement of a system under test

use crate::constructor::{Constructible, Constructor};
use crate::error::{ArrangeError, Result};
use crate::logging::trace;
use crate::registry::DependencyRegistry;
use std::any::{Any, type_name};

/// Read access to the dependencies of a type under test, best-effort
/// reconfiguration and construction of the system under test.
///
/// [`ArrangeContext`](crate::ArrangeContext) builds once and hands out the
/// cached instance; [`ArrangeObject`](crate::ArrangeObject) builds a fresh
/// instance on every call. `Built` captures that difference.
pub trait Arrangement: Sized {
    type Target: Constructible;

    /// What [`build_sut`](Arrangement::build_sut) hands back.
    type Built<'a>
    where
        Self: 'a;

    fn dependencies(&self) -> &DependencyRegistry;

    /// The constructor selected at resolution time.
    fn constructor(&self) -> &Constructor<Self::Target>;

    fn build_sut(&self) -> Result<Self::Built<'_>>;

    /// The dependency registered for `D`.
    ///
    /// # Errors
    ///
    /// [`ArrangeError::DependencyNotFound`] when `D` is not a parameter type of
    /// the selected constructor.
    fn dependency<D: Any>(&self) -> Result<&D> {
        self.dependencies()
            .get::<D>()
            .ok_or_else(|| ArrangeError::not_found(type_name::<D>()))
    }

    /// Run `configure` against the dependency registered for `D`.
    ///
    /// The dependency is only borrowed shared, so configuring it in place
    /// needs a handle with interior mutability (`Rc<Cell<_>>`, a fake holding
    /// a `CallRecorder`). Plain values are swapped out with `replace` instead.
    /// Does nothing when `D` is not registered.
    fn with_dependency<D: Any>(&mut self, configure: impl FnOnce(&D)) -> &mut Self {
        match self.dependencies().get::<D>() {
            Some(dependency) => configure(dependency),
            None => trace!(dependency = type_name::<D>(), "Nothing to configure"),
        }
        self
    }

    /// Like [`with_dependency`](Arrangement::with_dependency), also handing
    /// `configure` the arrangement itself so other dependencies can be read.
    fn with_dependency_ctx<D: Any>(&mut self, configure: impl FnOnce(&Self, &D)) -> &mut Self {
        match self.dependencies().get::<D>() {
            Some(dependency) => configure(&*self, dependency),
            None => trace!(dependency = type_name::<D>(), "Nothing to configure"),
        }
        self
    }
}
