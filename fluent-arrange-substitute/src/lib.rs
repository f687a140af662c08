//! Substitute backend for fluent-arrange.
//!
//! Register a factory per dependency type once, anywhere in the test binary,
//! and arrange systems under test without passing a port around.
//!
//! ## Registering substitutes
//!
//! ```ignore
//! use fluent_arrange_substitute::{CallRecorder, substitute};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Default)]
//! struct FakeAccountRepository {
//!     recorder: CallRecorder,
//! }
//!
//! impl AccountRepository for FakeAccountRepository {
//!     fn balance(&self, account: &str) -> u64 {
//!         self.recorder.record_with("balance", [account]);
//!         self.recorder.return_for("balance").unwrap_or_default()
//!     }
//! }
//!
//! substitute!(Arc<dyn AccountRepository> => Arc::new(FakeAccountRepository::default()));
//! ```
//!
//! ## Arranging
//!
//! ```ignore
//! use fluent_arrange_substitute::Arrange;
//!
//! let mut context = Arrange::context::<AccountService>()?;
//! context.with_dependency::<Arc<dyn AccountRepository>>(|_| {});
//! ```
//!
//! ## Recording calls
//!
//! ```
//! use fluent_arrange_substitute::CallRecorder;
//!
//! let recorder = CallRecorder::new();
//! recorder.record("load");
//!
//! assert_eq!(recorder.call_count("load"), 1);
//! assert!(recorder.was_called("load"));
//! ```

pub mod arrange;
pub mod recorder;
pub mod registry;

pub use arrange::{Arrange, Fluent};
pub use recorder::{Call, CallRecorder};
pub use registry::{
    SubstituteEntry, SubstituteError, Substitutes, create_mock, entries_for, registered_types,
};

#[doc(hidden)]
pub mod __private {
    pub use fluent_arrange_core::{DependencyType, instance};
    pub use inventory;
}
