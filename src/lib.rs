// FluentArrange - Fluent arrangement of the system under test for Rust unit tests
//
// Discovers the constructor of a type under test, substitutes every parameter
// and lets the test inspect, replace and configure the substitutes before the
// instance is built.

//! # Quick start
//!
//! ```
//! use fluent_arrange::prelude::*;
//! use std::sync::Arc;
//!
//! trait AccountRepository: Concrete {
//!     fn balance(&self, account: &str) -> u64;
//! }
//!
//! #[derive(Clone, Default)]
//! struct FakeAccountRepository {
//!     balance: u64,
//! }
//!
//! impl AccountRepository for FakeAccountRepository {
//!     fn balance(&self, _account: &str) -> u64 {
//!         self.balance
//!     }
//! }
//!
//! #[derive(Constructible)]
//! struct AccountService {
//!     repository: Arc<dyn AccountRepository>,
//! }
//!
//! let mut context = Arrange::context::<AccountService>(|_: DependencyType| {
//!     Ok(instance(Arc::new(FakeAccountRepository::default()) as Arc<dyn AccountRepository>))
//! })?;
//!
//! context.replace::<Arc<dyn AccountRepository>>(Arc::new(FakeAccountRepository { balance: 7 }))?;
//!
//! assert_eq!(context.sut()?.repository.balance("main"), 7);
//! # Ok::<(), ArrangeError>(())
//! ```

// Re-export core functionality
pub use fluent_arrange_core::*;

// Re-export procedural macros
pub use fluent_arrange_macros::{Constructible, constructors};

// Substitute backend
#[cfg(feature = "substitute")]
pub use fluent_arrange_substitute::substitute;

/// Entry points bound to substitutes registered with [`substitute!`].
#[cfg(feature = "substitute")]
pub mod substitute {
    pub use fluent_arrange_substitute::{
        Arrange, Call, CallRecorder, Fluent, SubstituteEntry, SubstituteError, Substitutes,
        create_mock, registered_types,
    };
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use fluent_arrange_core::prelude::*;

    pub use crate::{Constructible, constructors};

    #[cfg(feature = "substitute")]
    pub use fluent_arrange_substitute::{CallRecorder, substitute};
}
