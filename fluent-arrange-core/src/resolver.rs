// Constructor resolution and dependency population

use crate::constructor::{Constructible, Constructor, first_public};
use crate::dependency::{Dependency, DependencyType};
use crate::error::{ArrangeError, Result};
use crate::logging::{debug, trace};
use crate::port::MockResult;
use crate::registry::DependencyRegistry;

/// A selected constructor together with the dependencies created for it.
///
/// The constructor kept here is the one later used to build the system under
/// test, so discovery and construction always agree on parameter order.
pub struct Resolution<T> {
    pub(crate) constructor: Constructor<T>,
    pub(crate) dependencies: DependencyRegistry,
}

impl<T> Resolution<T> {
    pub fn constructor(&self) -> &Constructor<T> {
        &self.constructor
    }

    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }
}

impl<T> std::fmt::Debug for Resolution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("constructor", &self.constructor)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Selects a constructor of a type under test and fills a registry with one
/// substitute per parameter, obtained from the mock creation port.
pub struct ConstructorResolver<P> {
    port: P,
}

impl<P> ConstructorResolver<P>
where
    P: FnMut(DependencyType) -> MockResult,
{
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Resolve with the default policy: first public constructor.
    pub fn resolve<T: Constructible>(&mut self) -> Result<Resolution<T>> {
        self.resolve_with(first_public)
    }

    /// Resolve with a caller-supplied selector. The selector sees every
    /// declared constructor, public or not, in declaration order.
    pub fn resolve_with<T, S>(&mut self, selector: S) -> Result<Resolution<T>>
    where
        T: Constructible,
        S: FnOnce(&[Constructor<T>]) -> Option<&Constructor<T>>,
    {
        let type_name = std::any::type_name::<T>();
        let constructors = T::constructors();
        trace!(
            target_type = type_name,
            candidates = constructors.len(),
            "Selecting constructor"
        );

        let constructor = selector(&constructors)
            .cloned()
            .ok_or_else(|| ArrangeError::NoMatchingConstructor(type_name.to_string()))?;

        self.populate(constructor)
    }

    /// Resolve requiring exactly one public constructor.
    pub fn resolve_single<T: Constructible>(&mut self) -> Result<Resolution<T>> {
        let type_name = std::any::type_name::<T>();
        let mut public = T::constructors().into_iter().filter(|c| c.is_public());

        match (public.next(), public.next()) {
            (Some(constructor), None) => self.populate(constructor),
            _ => {
                debug!(target_type = type_name, "Expected exactly one public constructor");
                Err(ArrangeError::NoMatchingConstructor(type_name.to_string()))
            }
        }
    }

    fn populate<T>(&mut self, constructor: Constructor<T>) -> Result<Resolution<T>> {
        let type_name = std::any::type_name::<T>();
        debug!(
            target_type = type_name,
            constructor = constructor.name(),
            parameters = constructor.parameters().len(),
            "Constructor selected"
        );

        let mut dependencies = DependencyRegistry::with_capacity(constructor.parameters().len());

        for parameter in constructor.parameters() {
            trace!(
                parameter = parameter.name,
                dependency = parameter.ty.name(),
                "Creating substitute"
            );

            let instance = (self.port)(parameter.ty).map_err(ArrangeError::MockCreation)?;
            let created = instance.dependency_type();
            if created != parameter.ty {
                return Err(ArrangeError::mismatch(created.name(), parameter.ty.name()));
            }

            dependencies.insert(parameter.ty, instance);
        }

        debug!(
            target_type = type_name,
            dependencies = dependencies.len(),
            "Dependencies resolved"
        );

        Ok(Resolution {
            constructor,
            dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructor::{Parameter, Visibility};
    use crate::dependency::instance;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Clock(u64);

    #[derive(Clone)]
    struct Store(&'static str);

    struct Scheduler;

    impl Constructible for Scheduler {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![
                Constructor::new("default", Visibility::Private, vec![], |_| Ok(Scheduler)),
                Constructor::new(
                    "new",
                    Visibility::Public,
                    vec![Parameter::of::<Clock>("clock"), Parameter::of::<Store>("store")],
                    |args| {
                        args.next::<Clock>()?;
                        args.next::<Store>()?;
                        Ok(Scheduler)
                    },
                ),
            ]
        }
    }

    struct Window;

    impl Constructible for Window {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new(
                "new",
                Visibility::Public,
                vec![Parameter::of::<Clock>("opens"), Parameter::of::<Clock>("closes")],
                |args| {
                    args.next::<Clock>()?;
                    args.next::<Clock>()?;
                    Ok(Window)
                },
            )]
        }
    }

    struct Hidden;

    impl Constructible for Hidden {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new("new", Visibility::Private, vec![], |_| Ok(Hidden))]
        }
    }

    fn port(log: Rc<RefCell<Vec<&'static str>>>) -> impl FnMut(DependencyType) -> MockResult {
        move |ty: DependencyType| {
            log.borrow_mut().push(ty.name());
            if ty.is::<Clock>() {
                Ok(instance(Clock(0)))
            } else {
                Ok(instance(Store("memory")))
            }
        }
    }

    #[test]
    fn test_default_policy_skips_private_constructors() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let resolution = ConstructorResolver::new(port(log.clone()))
            .resolve::<Scheduler>()
            .unwrap();

        assert_eq!(resolution.constructor().name(), "new");
        let types: Vec<_> = resolution.dependencies().types().collect();
        assert_eq!(types, vec![DependencyType::of::<Clock>(), DependencyType::of::<Store>()]);
    }

    #[test]
    fn test_port_called_once_per_parameter_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        ConstructorResolver::new(port(log.clone()))
            .resolve::<Scheduler>()
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![std::any::type_name::<Clock>(), std::any::type_name::<Store>()]
        );
    }

    #[test]
    fn test_selector_sees_private_constructors() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let resolution = ConstructorResolver::new(port(log.clone()))
            .resolve_with::<Scheduler, _>(|constructors| constructors.first())
            .unwrap();

        assert_eq!(resolution.constructor().name(), "default");
        assert!(resolution.dependencies().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_selector_returning_none() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let err = ConstructorResolver::new(port(log))
            .resolve_with::<Scheduler, _>(|_| None)
            .unwrap_err();

        assert!(matches!(err, ArrangeError::NoMatchingConstructor(_)));
    }

    #[test]
    fn test_no_public_constructor() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let err = ConstructorResolver::new(port(log))
            .resolve::<Hidden>()
            .unwrap_err();

        assert!(matches!(err, ArrangeError::NoMatchingConstructor(name) if name.ends_with("Hidden")));
    }

    #[test]
    fn test_single_policy_accepts_one_public_constructor() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let resolution = ConstructorResolver::new(port(log))
            .resolve_single::<Scheduler>()
            .unwrap();

        assert_eq!(resolution.constructor().name(), "new");
        assert_eq!(resolution.dependencies().len(), 2);
    }

    #[test]
    fn test_port_returning_wrong_type() {
        let mut resolver = ConstructorResolver::new(|_: DependencyType| Ok(instance(7u8)));
        let err = resolver.resolve::<Scheduler>().unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "The found dependency is of type 'u8' but type '{}' was expected",
                std::any::type_name::<Clock>()
            )
        );
    }

    #[test]
    fn test_port_failure_propagates() {
        let mut resolver =
            ConstructorResolver::new(|ty: DependencyType| Err(format!("cannot mock {ty}").into()));
        let err = resolver.resolve::<Scheduler>().unwrap_err();

        assert!(matches!(err, ArrangeError::MockCreation(_)));
        assert_eq!(
            err.to_string(),
            format!("cannot mock {}", std::any::type_name::<Clock>())
        );
    }

    #[test]
    fn test_duplicate_parameter_type_keeps_last_substitute() {
        let mut created = 0;
        let mut resolver = ConstructorResolver::new(|_: DependencyType| {
            created += 1;
            Ok(instance(Clock(created)))
        });
        let resolution = resolver.resolve::<Window>().unwrap();
        drop(resolver);

        assert_eq!(created, 2);
        assert_eq!(resolution.dependencies().len(), 1);
        assert_eq!(resolution.dependencies().get::<Clock>().map(|c| c.0), Some(2));

        let err = resolution
            .constructor()
            .construct(resolution.dependencies())
            .map(|_| ())
            .unwrap_err();

        assert!(matches!(
            err,
            ArrangeError::MissingArgument { constructor, position: 1, .. } if constructor == "new"
        ));
    }
}
