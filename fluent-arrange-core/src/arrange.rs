// Entry points taking an explicit mock creation port

use crate::constructor::{Constructible, Constructor};
use crate::context::ArrangeContext;
use crate::dependency::DependencyType;
use crate::error::Result;
use crate::object::ArrangeObject;
use crate::port::MockResult;
use crate::resolver::ConstructorResolver;

/// Arrange a system under test whose dependencies come from `port`.
///
/// Every entry point calls `port` once per constructor parameter, in
/// parameter order.
pub struct Arrange;

impl Arrange {
    /// Resolve the first public constructor of `T` and wrap the dependencies
    /// in an [`ArrangeContext`].
    pub fn context<T: Constructible>(
        port: impl FnMut(DependencyType) -> MockResult,
    ) -> Result<ArrangeContext<T>> {
        ConstructorResolver::new(port)
            .resolve::<T>()
            .map(ArrangeContext::new)
    }

    /// Like [`context`](Arrange::context), with a caller-chosen constructor.
    ///
    /// ```
    /// use fluent_arrange_core::prelude::*;
    ///
    /// struct Cache {
    ///     capacity: usize,
    /// }
    ///
    /// impl Constructible for Cache {
    ///     fn constructors() -> Vec<Constructor<Self>> {
    ///         vec![
    ///             Constructor::new("new", Visibility::Public, vec![], |_| Ok(Cache { capacity: 16 })),
    ///             Constructor::new(
    ///                 "with_capacity",
    ///                 Visibility::Public,
    ///                 vec![Parameter::of::<usize>("capacity")],
    ///                 |args| Ok(Cache { capacity: args.next()? }),
    ///             ),
    ///         ]
    ///     }
    /// }
    ///
    /// let context = Arrange::context_with::<Cache>(
    ///     |_: DependencyType| Ok(instance(64usize)),
    ///     |constructors| constructors.iter().find(|c| c.name() == "with_capacity"),
    /// )?;
    ///
    /// assert_eq!(context.sut()?.capacity, 64);
    /// # Ok::<(), ArrangeError>(())
    /// ```
    pub fn context_with<T: Constructible>(
        port: impl FnMut(DependencyType) -> MockResult,
        selector: impl FnOnce(&[Constructor<T>]) -> Option<&Constructor<T>>,
    ) -> Result<ArrangeContext<T>> {
        ConstructorResolver::new(port)
            .resolve_with(selector)
            .map(ArrangeContext::new)
    }

    /// Resolve and build `T` straight away.
    pub fn sut<T: Constructible>(port: impl FnMut(DependencyType) -> MockResult) -> Result<T> {
        Self::context::<T>(port)?.into_sut()
    }

    /// Resolve and build `T`, then run `arrange` on the built instance.
    pub fn sut_with<T: Constructible>(
        port: impl FnMut(DependencyType) -> MockResult,
        arrange: impl FnOnce(&mut T),
    ) -> Result<T> {
        let mut sut = Self::sut::<T>(port)?;
        arrange(&mut sut);
        Ok(sut)
    }
}

/// Legacy entry point producing an [`ArrangeObject`].
pub struct Fluent;

impl Fluent {
    /// Resolve `T`, which must declare exactly one public constructor.
    pub fn arrange<T: Constructible>(
        port: impl FnMut(DependencyType) -> MockResult,
    ) -> Result<ArrangeObject<T>> {
        ConstructorResolver::new(port)
            .resolve_single::<T>()
            .map(ArrangeObject::new)
    }
}
