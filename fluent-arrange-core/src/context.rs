// Arrangement context: mutable dependencies, system under test built once

use crate::arrangement::Arrangement;
use crate::constructor::{Constructible, Constructor};
use crate::dependency::Concrete;
use crate::error::{ArrangeError, Result};
use crate::logging::{debug, trace};
use crate::registry::DependencyRegistry;
use crate::resolver::Resolution;
use once_cell::unsync::OnceCell;
use std::any::{Any, type_name};
use std::ops::Deref;

/// Fluent builder over the dependencies of one `T`.
///
/// Dependencies can be inspected, replaced and configured until the system
/// under test is first requested. From then on the same instance is returned;
/// later replacements do not rebuild it.
///
/// ```
/// use fluent_arrange_core::prelude::*;
/// use std::sync::Arc;
///
/// trait Clock: Concrete {
///     fn now(&self) -> u64;
/// }
///
/// #[derive(Clone)]
/// struct FixedClock(u64);
///
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 {
///         self.0
///     }
/// }
///
/// struct Stamp {
///     clock: Arc<dyn Clock>,
/// }
///
/// impl Constructible for Stamp {
///     fn constructors() -> Vec<Constructor<Self>> {
///         vec![Constructor::new(
///             "new",
///             Visibility::Public,
///             vec![Parameter::of::<Arc<dyn Clock>>("clock")],
///             |args| Ok(Stamp { clock: args.next()? }),
///         )]
///     }
/// }
///
/// let mut context = Arrange::context::<Stamp>(|_: DependencyType| {
///     Ok(instance(Arc::new(FixedClock(0)) as Arc<dyn Clock>))
/// })?;
///
/// context.replace::<Arc<dyn Clock>>(Arc::new(FixedClock(42)))?;
///
/// assert_eq!(context.dependency_as::<Arc<dyn Clock>, FixedClock>()?.0, 42);
/// assert_eq!(context.sut()?.clock.now(), 42);
/// # Ok::<(), ArrangeError>(())
/// ```
pub struct ArrangeContext<T> {
    constructor: Constructor<T>,
    dependencies: DependencyRegistry,
    sut: OnceCell<T>,
}

impl<T: Constructible> ArrangeContext<T> {
    pub fn new(resolution: Resolution<T>) -> Self {
        debug!(
            target_type = type_name::<T>(),
            dependencies = resolution.dependencies.len(),
            "Arrangement context created"
        );
        Self {
            constructor: resolution.constructor,
            dependencies: resolution.dependencies,
            sut: OnceCell::new(),
        }
    }

    /// The system under test, built on first access.
    pub fn sut(&self) -> Result<&T> {
        self.build_sut()
    }

    /// Whether the system under test has been built.
    pub fn is_built(&self) -> bool {
        self.sut.get().is_some()
    }

    /// Take the system under test out of the context, building it if needed.
    pub fn into_sut(self) -> Result<T> {
        match self.sut.into_inner() {
            Some(sut) => Ok(sut),
            None => self.constructor.construct(&self.dependencies),
        }
    }

    /// The dependency registered for `D`, narrowed to its concrete type `C`.
    ///
    /// The check is exact: a value of some other type implementing the same
    /// trait is rejected.
    ///
    /// # Errors
    ///
    /// [`ArrangeError::DependencyNotFound`] when `D` is not registered,
    /// [`ArrangeError::DependencyTypeMismatch`] when the value behind the
    /// handle is not a `C`.
    pub fn dependency_as<D, C>(&self) -> Result<&C>
    where
        D: Deref + Any,
        D::Target: Concrete,
        C: Any,
    {
        let target: &D::Target = self.dependency::<D>()?;

        <D::Target as Concrete>::concrete_any(target)
            .downcast_ref::<C>()
            .ok_or_else(|| {
                let actual = <D::Target as Concrete>::concrete_type(target);
                ArrangeError::mismatch(actual.name(), type_name::<C>())
            })
    }

    /// Replace the dependency registered for `D`.
    ///
    /// # Errors
    ///
    /// [`ArrangeError::DependencyNotFound`] when `D` is not registered; the
    /// registry is left untouched.
    pub fn replace<D: Any + Clone>(&mut self, value: D) -> Result<&mut Self> {
        self.dependency::<D>()?;
        self.dependencies.replace(value)?;
        if self.is_built() {
            trace!(
                dependency = type_name::<D>(),
                "Replaced after build, cached instance keeps the old value"
            );
        }
        Ok(self)
    }

    /// Replace the dependency registered for `D`, then configure the new value.
    pub fn replace_with<D: Any + Clone>(
        &mut self,
        value: D,
        configure: impl FnOnce(&D),
    ) -> Result<&mut Self> {
        self.replace(value)?;
        configure(self.dependency::<D>()?);
        Ok(self)
    }

    /// Replace the dependency registered for `D`, then configure it through its
    /// concrete type `C`.
    pub fn replace_as<D, C>(&mut self, value: D, configure: impl FnOnce(&C)) -> Result<&mut Self>
    where
        D: Deref + Any + Clone,
        D::Target: Concrete,
        C: Any,
    {
        self.replace(value)?;
        configure(self.dependency_as::<D, C>()?);
        Ok(self)
    }

    /// Replace the dependency registered for `D`, then configure the new value
    /// with access to the whole context.
    pub fn replace_with_ctx<D: Any + Clone>(
        &mut self,
        value: D,
        configure: impl FnOnce(&Self, &D),
    ) -> Result<&mut Self> {
        self.replace(value)?;
        let dependency = self.dependency::<D>()?;
        configure(&*self, dependency);
        Ok(self)
    }
}

impl<T: Constructible> Arrangement for ArrangeContext<T> {
    type Target = T;
    type Built<'a>
        = &'a T
    where
        Self: 'a;

    fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    /// Build the system under test once; later calls return the same instance.
    fn build_sut(&self) -> Result<Self::Built<'_>> {
        self.sut.get_or_try_init(|| {
            debug!(
                target_type = type_name::<T>(),
                constructor = self.constructor.name(),
                "Building system under test"
            );
            self.constructor.construct(&self.dependencies)
        })
    }
}

impl<T: Constructible> From<Resolution<T>> for ArrangeContext<T> {
    fn from(resolution: Resolution<T>) -> Self {
        Self::new(resolution)
    }
}

impl<T> std::fmt::Debug for ArrangeContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrangeContext")
            .field("constructor", &self.constructor)
            .field("dependencies", &self.dependencies)
            .field("built", &self.sut.get().is_some())
            .finish()
    }
}
