// Entry points bound to the substitute registry

use crate::registry::Substitutes;
use fluent_arrange_core::{
    ArrangeContext, ArrangeObject, Constructible, Constructor, DependencyType, MockBackend,
    MockResult, Result,
};

/// Arrange a system under test with substitutes registered through
/// [`substitute!`](crate::substitute).
///
/// ```ignore
/// substitute!(Arc<dyn AccountRepository> => Arc::new(FakeAccountRepository::default()));
///
/// let mut context = Arrange::context::<AccountService>()?;
/// context.with_dependency::<Arc<dyn AccountRepository>>(|repo| { /* ... */ });
/// let service = context.sut()?;
/// ```
pub struct Arrange;

impl Arrange {
    pub fn context<T: Constructible>() -> Result<ArrangeContext<T>> {
        fluent_arrange_core::Arrange::context::<T>(Self::create_mock)
    }

    pub fn context_with<T: Constructible>(
        selector: impl FnOnce(&[Constructor<T>]) -> Option<&Constructor<T>>,
    ) -> Result<ArrangeContext<T>> {
        fluent_arrange_core::Arrange::context_with::<T>(Self::create_mock, selector)
    }

    pub fn sut<T: Constructible>() -> Result<T> {
        fluent_arrange_core::Arrange::sut::<T>(Self::create_mock)
    }

    pub fn sut_with<T: Constructible>(arrange: impl FnOnce(&mut T)) -> Result<T> {
        fluent_arrange_core::Arrange::sut_with::<T>(Self::create_mock, arrange)
    }

    /// Mock creation port backed by the substitute registry.
    pub fn create_mock(ty: DependencyType) -> MockResult {
        Substitutes.create_mock(ty)
    }
}

/// Legacy entry point bound to the substitute registry.
pub struct Fluent;

impl Fluent {
    pub fn arrange<T: Constructible>() -> Result<ArrangeObject<T>> {
        fluent_arrange_core::Fluent::arrange::<T>(Arrange::create_mock)
    }
}
