// Error types for arranging a system under test

use thiserror::Error;

/// Boxed error used at the seams where user code (mock factories and
/// constructors) can fail with an arbitrary error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ArrangeError {
    #[error("No matching constructor found for type {0}")]
    NoMatchingConstructor(String),

    #[error("No dependency found of type {0}")]
    DependencyNotFound(String),

    #[error("The found dependency is of type '{actual}' but type '{expected}' was expected")]
    DependencyTypeMismatch { actual: String, expected: String },

    #[error("Constructor {constructor} has no argument of type {expected} at position {position}")]
    MissingArgument {
        constructor: String,
        position: usize,
        expected: String,
    },

    /// The mock creation port failed. The original error is kept as is.
    #[error(transparent)]
    MockCreation(BoxError),

    /// The constructor of the system under test failed. The original error is
    /// kept as is; use `downcast_ref` to recover it.
    #[error(transparent)]
    Construction(BoxError),
}

impl ArrangeError {
    pub(crate) fn not_found(type_name: &str) -> Self {
        ArrangeError::DependencyNotFound(type_name.to_string())
    }

    pub(crate) fn mismatch(actual: &str, expected: &str) -> Self {
        ArrangeError::DependencyTypeMismatch {
            actual: actual.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Classify an error returned by a constructor.
    ///
    /// Argument errors raised by [`Arguments`](crate::Arguments) are boxed on
    /// their way through the constructor and come back out as themselves.
    pub(crate) fn from_construction(error: BoxError) -> Self {
        match error.downcast::<ArrangeError>() {
            Ok(inner) => *inner,
            Err(other) => ArrangeError::Construction(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrangeError>;
