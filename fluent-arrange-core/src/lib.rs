// Core library for FluentArrange
// Constructor discovery, dependency registries and arrangement contexts

pub mod arrange;
pub mod arrangement;
pub mod constructor;
pub mod context;
pub mod dependency;
pub mod error;
pub mod ext;
pub mod logging;
pub mod object;
pub mod port;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use arrange::{Arrange, Fluent};
pub use arrangement::Arrangement;
pub use constructor::{
    Arguments, ConstructFn, Constructible, Constructor, Parameter, Visibility, first_public,
};
pub use context::ArrangeContext;
pub use dependency::{Concrete, Dependency, DependencyType, Instance, instance};
pub use error::{ArrangeError, BoxError, Result};
pub use ext::With;
pub use logging::{LogConfig, LogFormat, LogInitError, LogLevel, LogOutput};
pub use object::ArrangeObject;
pub use port::{MockBackend, MockResult};
pub use registry::DependencyRegistry;
pub use resolver::{ConstructorResolver, Resolution};

/// Everything needed to arrange a system under test with an explicit port.
pub mod prelude {
    pub use crate::{
        Arrange,
        ArrangeContext,
        ArrangeError,
        ArrangeObject,
        Arrangement,
        Concrete,
        Constructible,
        Constructor,
        DependencyType,
        Fluent,
        MockBackend,
        MockResult,
        Parameter,
        Visibility,
        instance,
    };
}
