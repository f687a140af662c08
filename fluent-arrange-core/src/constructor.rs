// Constructor descriptors for types under test

use crate::dependency::{Dependency, DependencyType};
use crate::error::{ArrangeError, BoxError, Result};
use crate::logging::trace;
use crate::registry::DependencyRegistry;
use std::any::Any;

/// Accessibility of a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// A declared constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    pub ty: DependencyType,
}

impl Parameter {
    pub fn of<P: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty: DependencyType::of::<P>(),
        }
    }
}

/// Function that builds a `T` from arguments taken in parameter order.
pub type ConstructFn<T> = fn(&mut Arguments<'_>) -> std::result::Result<T, BoxError>;

/// Describes one way of constructing a `T`.
///
/// Usually generated by `#[derive(Constructible)]` or `#[constructors]`.
pub struct Constructor<T> {
    name: &'static str,
    visibility: Visibility,
    parameters: Vec<Parameter>,
    invoke: ConstructFn<T>,
}

impl<T> Constructor<T> {
    pub fn new(
        name: &'static str,
        visibility: Visibility,
        parameters: Vec<Parameter>,
        invoke: ConstructFn<T>,
    ) -> Self {
        Self {
            name,
            visibility,
            parameters,
            invoke,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Declared parameters in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Call the constructor with the registry's values in registry order.
    ///
    /// Failures of the constructor itself are returned untouched as
    /// [`ArrangeError::Construction`].
    pub fn construct(&self, dependencies: &DependencyRegistry) -> Result<T> {
        trace!(
            constructor = self.name,
            arguments = dependencies.len(),
            "Invoking constructor"
        );
        let mut arguments = Arguments::new(self.name, dependencies);
        (self.invoke)(&mut arguments).map_err(ArrangeError::from_construction)
    }
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            visibility: self.visibility,
            parameters: self.parameters.clone(),
            invoke: self.invoke,
        }
    }
}

impl<T> std::fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Types whose constructors can be discovered.
///
/// `constructors` lists every declared constructor in declaration order.
pub trait Constructible: Sized + 'static {
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Cursor over registry values handed to a [`Constructor`].
pub struct Arguments<'a> {
    constructor: &'static str,
    values: Box<dyn Iterator<Item = &'a (dyn Dependency + 'static)> + 'a>,
    position: usize,
}

impl<'a> Arguments<'a> {
    fn new(constructor: &'static str, dependencies: &'a DependencyRegistry) -> Self {
        Self {
            constructor,
            values: Box::new(dependencies.values()),
            position: 0,
        }
    }

    /// Take the next argument as a `P`.
    pub fn next<P: Any + Clone>(&mut self) -> Result<P> {
        let position = self.position;
        self.position += 1;

        let value = self.values.next().ok_or_else(|| ArrangeError::MissingArgument {
            constructor: self.constructor.to_string(),
            position,
            expected: std::any::type_name::<P>().to_string(),
        })?;

        value.as_any().downcast_ref::<P>().cloned().ok_or_else(|| {
            ArrangeError::mismatch(value.dependency_type().name(), std::any::type_name::<P>())
        })
    }

    /// Number of arguments taken so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Default selection policy: the first public constructor in declaration order.
pub fn first_public<T>(constructors: &[Constructor<T>]) -> Option<&Constructor<T>> {
    constructors.iter().find(|c| c.is_public())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::instance;

    #[derive(Debug, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    fn endpoint_constructor() -> Constructor<Endpoint> {
        Constructor::new(
            "new",
            Visibility::Public,
            vec![Parameter::of::<String>("host"), Parameter::of::<u16>("port")],
            |args| {
                Ok(Endpoint {
                    host: args.next::<String>()?,
                    port: args.next::<u16>()?,
                })
            },
        )
    }

    fn registry() -> DependencyRegistry {
        [
            (DependencyType::of::<String>(), instance("localhost".to_string())),
            (DependencyType::of::<u16>(), instance(8080u16)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_construct_in_registry_order() {
        let built = endpoint_constructor().construct(&registry()).unwrap();
        assert_eq!(
            built,
            Endpoint {
                host: "localhost".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_missing_argument() {
        let registry: DependencyRegistry =
            [(DependencyType::of::<String>(), instance("h".to_string()))]
                .into_iter()
                .collect();

        let err = endpoint_constructor().construct(&registry).unwrap_err();
        assert!(matches!(
            err,
            ArrangeError::MissingArgument { position: 1, .. }
        ));
    }

    #[test]
    fn test_argument_of_wrong_type() {
        let registry: DependencyRegistry = [
            (DependencyType::of::<u16>(), instance(1u16)),
            (DependencyType::of::<String>(), instance("h".to_string())),
        ]
        .into_iter()
        .collect();

        let err = endpoint_constructor().construct(&registry).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The found dependency is of type 'u16' but type 'alloc::string::String' was expected"
        );
    }

    #[test]
    fn test_first_public_skips_private() {
        let constructors = vec![
            Constructor::<Endpoint>::new("hidden", Visibility::Private, vec![], |_| {
                Ok(Endpoint {
                    host: String::new(),
                    port: 0,
                })
            }),
            endpoint_constructor(),
        ];

        assert_eq!(first_public(&constructors).map(|c| c.name()), Some("new"));
        assert!(first_public::<Endpoint>(&[]).is_none());
    }
}
