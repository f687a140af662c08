// Mock creation port

use crate::dependency::{DependencyType, Instance};
use crate::error::BoxError;

/// Outcome of asking a port for a substitute.
pub type MockResult = Result<Instance, BoxError>;

/// A mocking backend able to produce a substitute for a requested type.
///
/// Entry points accept any `FnMut(DependencyType) -> MockResult` as the port;
/// a backend is adapted with [`MockBackend::port`]. The returned instance must
/// be a value of exactly the requested type.
pub trait MockBackend {
    fn create_mock(&self, ty: DependencyType) -> MockResult;

    /// Borrow this backend as a mock creation port.
    fn port(&self) -> impl FnMut(DependencyType) -> MockResult + '_
    where
        Self: Sized,
    {
        move |ty| self.create_mock(ty)
    }
}

impl<B: MockBackend> MockBackend for &B {
    fn create_mock(&self, ty: DependencyType) -> MockResult {
        (**self).create_mock(ty)
    }
}
