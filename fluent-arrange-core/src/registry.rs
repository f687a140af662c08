// Ordered registry of constructor dependencies

use crate::dependency::{Dependency, DependencyType, Instance, instance};
use crate::error::{ArrangeError, Result};
use crate::logging::{debug, trace};
use indexmap::IndexMap;
use std::any::Any;

/// The dependencies of one type under test, keyed by declared parameter type.
///
/// Insertion order is the constructor's parameter order and is the order in
/// which values are handed back to the constructor. Keys are fixed when the
/// registry is populated; afterwards values can only be replaced.
pub struct DependencyRegistry {
    entries: IndexMap<DependencyType, Instance>,
}

impl DependencyRegistry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Bind `ty` to `instance` during population.
    ///
    /// A repeated parameter type overwrites the earlier value in place.
    pub(crate) fn insert(&mut self, ty: DependencyType, instance: Instance) {
        trace!(dependency = ty.name(), "Inserting dependency");
        if self.entries.insert(ty, instance).is_some() {
            debug!(dependency = ty.name(), "Duplicate parameter type, keeping last value");
        }
    }

    /// Overwrite the value stored for `D`.
    pub(crate) fn replace<D: Any + Clone>(&mut self, value: D) -> Result<()> {
        let ty = DependencyType::of::<D>();
        match self.entries.get_mut(&ty) {
            Some(slot) => {
                *slot = instance(value);
                debug!(dependency = ty.name(), "Dependency replaced");
                Ok(())
            }
            None => Err(ArrangeError::not_found(ty.name())),
        }
    }

    /// Typed lookup. `None` when `D` is not a parameter type.
    pub fn get<D: Any>(&self) -> Option<&D> {
        let ty = DependencyType::of::<D>();
        let found = self
            .get_type(ty)
            .and_then(|dependency| dependency.as_any().downcast_ref::<D>());

        trace!(dependency = ty.name(), found = found.is_some(), "Looked up dependency");
        found
    }

    /// Untyped lookup by identity.
    pub fn get_type(&self, ty: DependencyType) -> Option<&(dyn Dependency + 'static)> {
        self.entries.get(&ty).map(|instance| instance.as_ref())
    }

    pub fn contains<D: Any>(&self) -> bool {
        self.contains_type(DependencyType::of::<D>())
    }

    pub fn contains_type(&self, ty: DependencyType) -> bool {
        self.entries.contains_key(&ty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameter types in constructor order.
    pub fn types(&self) -> impl Iterator<Item = DependencyType> + '_ {
        self.entries.keys().copied()
    }

    /// Stored values in constructor order.
    pub fn values(&self) -> impl Iterator<Item = &(dyn Dependency + 'static)> + '_ {
        self.entries.values().map(|instance| instance.as_ref())
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (DependencyType, &(dyn Dependency + 'static))> + '_ {
        self.entries
            .iter()
            .map(|(ty, instance)| (*ty, instance.as_ref()))
    }
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
impl FromIterator<(DependencyType, Instance)> for DependencyRegistry {
    fn from_iter<I: IntoIterator<Item = (DependencyType, Instance)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut registry = DependencyRegistry::with_capacity(iter.size_hint().0);
        for (ty, instance) in iter {
            registry.insert(ty, instance);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    struct Port(u16);

    #[derive(Clone, Debug, PartialEq)]
    struct Host(String);

    fn registry() -> DependencyRegistry {
        [
            (DependencyType::of::<Host>(), instance(Host("localhost".to_string()))),
            (DependencyType::of::<Port>(), instance(Port(8080))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_preserves_insertion_order() {
        let registry = registry();
        let types: Vec<_> = registry.types().collect();
        assert_eq!(types, vec![DependencyType::of::<Host>(), DependencyType::of::<Port>()]);
    }

    #[test]
    fn test_typed_lookup() {
        let registry = registry();
        assert_eq!(registry.get::<Port>(), Some(&Port(8080)));
        assert_eq!(registry.get::<u8>(), None);
        assert!(registry.contains::<Host>());
        assert!(!registry.contains::<u8>());
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut registry = registry();
        registry.replace(Host("example.org".to_string())).unwrap();

        assert_eq!(registry.get::<Host>(), Some(&Host("example.org".to_string())));
        assert_eq!(registry.types().next(), Some(DependencyType::of::<Host>()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_replace_unknown_type_fails() {
        let mut registry = registry();
        let err = registry.replace(7u8).unwrap_err();

        assert_eq!(err.to_string(), "No dependency found of type u8");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_keeps_last_value() {
        let first = Rc::new(1);
        let second = Rc::new(2);
        let registry: DependencyRegistry = [
            (DependencyType::of::<Rc<i32>>(), instance(first)),
            (DependencyType::of::<Rc<i32>>(), instance(second.clone())),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 1);
        assert!(Rc::ptr_eq(registry.get::<Rc<i32>>().unwrap(), &second));
    }

    #[test]
    fn test_empty_registry() {
        let registry: DependencyRegistry = std::iter::empty().collect();
        assert!(registry.is_empty());
        assert_eq!(registry.values().count(), 0);
    }
}
