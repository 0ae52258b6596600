//! Ordered catalog of classification methods
//!
//! The registry is an explicit context object owned by the session. Built-in
//! methods are registered at construction and can never be removed; user
//! methods are added on commit and removed only on request.

use crate::descriptor::MethodDescriptor;
use chorobin_core::{Classifier, Error, MethodCategory, MethodId, Result, Scale};
use chorobin_histogram::BinSizes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Catalog filter; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodFilter {
    pub categories: Option<BTreeSet<MethodCategory>>,
    pub methods: Option<BTreeSet<MethodId>>,
    /// Case-insensitive substring of the method name
    pub search: Option<String>,
}

impl MethodFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = MethodCategory>) -> Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = MethodId>) -> Self {
        self.methods = Some(methods.into_iter().collect());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn matches(&self, descriptor: &MethodDescriptor) -> bool {
        if let Some(categories) = &self.categories {
            if !categories.contains(&descriptor.category) {
                return false;
            }
        }
        if let Some(methods) = &self.methods {
            if !methods.contains(&descriptor.id) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !descriptor.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Ordered method catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRegistry {
    methods: Vec<MethodDescriptor>,
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodRegistry {
    /// Registry holding every built-in method in catalog order
    pub fn new() -> Self {
        let mut methods = Vec::with_capacity(Classifier::ALL.len() + 2);
        methods.push(MethodDescriptor::unclassed());
        methods.extend(Classifier::ALL.iter().map(|c| MethodDescriptor::library(*c)));
        methods.push(MethodDescriptor::resiliency());
        Self { methods }
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn get(&self, id: &MethodId) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| &m.id == id)
    }

    pub fn get_mut(&mut self, id: &MethodId) -> Option<&mut MethodDescriptor> {
        self.methods.iter_mut().find(|m| &m.id == id)
    }

    /// Lookup that reports unknown ids as errors
    pub fn require(&self, id: &MethodId) -> Result<&MethodDescriptor> {
        self.get(id).ok_or_else(|| Error::unknown_method(id))
    }

    pub fn contains(&self, id: &MethodId) -> bool {
        self.get(id).is_some()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &MethodDescriptor> + '_ {
        self.methods.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MethodDescriptor> + '_ {
        self.methods.iter_mut()
    }

    pub fn ids(&self) -> Vec<MethodId> {
        self.methods.iter().map(|m| m.id.clone()).collect()
    }

    pub fn user_methods(&self) -> impl Iterator<Item = &MethodDescriptor> + '_ {
        self.methods.iter().filter(|m| m.is_user_created)
    }

    /// Descriptors matching `filter`, in registration order
    pub fn filter<'a>(&'a self, filter: &'a MethodFilter) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
        self.methods.iter().filter(move |m| filter.matches(m))
    }

    /// Add a user method, replacing an earlier user method with the same id
    pub fn register_user_method(&mut self, descriptor: MethodDescriptor) -> Result<()> {
        if !descriptor.is_user_created {
            return Err(Error::InvalidParameter(format!(
                "Method {} is not user-created",
                descriptor.id
            )));
        }
        if descriptor.id.as_str().is_empty() {
            return Err(Error::InvalidParameter(
                "User method name must contain non-whitespace characters".to_string(),
            ));
        }
        match self.methods.iter().position(|m| m.id == descriptor.id) {
            Some(index) if self.methods[index].is_builtin() => Err(Error::InvalidParameter(
                format!("Method id {} is reserved by a built-in method", descriptor.id),
            )),
            Some(index) => {
                debug!(id = %descriptor.id, "replacing user method");
                self.methods[index] = descriptor;
                Ok(())
            }
            None => {
                debug!(id = %descriptor.id, "registering user method");
                self.methods.push(descriptor);
                Ok(())
            }
        }
    }

    /// Remove a user method; built-ins are rejected
    pub fn remove_user_method(&mut self, id: &MethodId) -> Result<MethodDescriptor> {
        let index = self
            .methods
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| Error::unknown_method(id))?;
        if self.methods[index].is_builtin() {
            return Err(Error::InvalidParameter(format!(
                "Built-in method {id} cannot be removed"
            )));
        }
        Ok(self.methods.remove(index))
    }

    /// Store the latest scale and bin sizes of a method
    pub fn update(&mut self, id: &MethodId, scale: Scale, bin_sizes: BinSizes) -> Result<()> {
        let descriptor = self.get_mut(id).ok_or_else(|| Error::unknown_method(id))?;
        descriptor.scale = scale;
        descriptor.bin_sizes = bin_sizes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chorobin_core::{Color, ManualBin, ManualBinSet, SchemeRef};

    fn user(name: &str) -> MethodDescriptor {
        let bins = ManualBinSet::new(vec![
            ManualBin::new(0.0, 1.0, Color::WHITE),
            ManualBin::new(1.0, 2.0, Color::BLACK),
        ]);
        MethodDescriptor::user_defined(name, "test", bins)
    }

    #[test]
    fn test_builtins_in_catalog_order() {
        let registry = MethodRegistry::new();
        assert_eq!(registry.len(), 16);
        let ids = registry.ids();
        assert_eq!(ids[0].as_str(), MethodId::UNCLASSED);
        assert_eq!(ids[1].as_str(), "equal_interval");
        assert_eq!(ids[14].as_str(), "fisher_jenks");
        assert_eq!(ids[15].as_str(), MethodId::RESILIENCY);
        assert!(registry.iter().all(|m| m.is_builtin()));
    }

    #[test]
    fn test_register_and_remove_user_method() {
        let mut registry = MethodRegistry::new();
        registry.register_user_method(user("Hand Tuned")).unwrap();
        assert_eq!(registry.len(), 17);
        let id = MethodId::new("HandTuned");
        assert!(registry.contains(&id));
        assert_eq!(registry.user_methods().count(), 1);

        // same id replaces in place
        registry.register_user_method(user("Hand  Tuned")).unwrap();
        assert_eq!(registry.len(), 17);

        let removed = registry.remove_user_method(&id).unwrap();
        assert_eq!(removed.name, "Hand  Tuned");
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_builtins_are_protected() {
        let mut registry = MethodRegistry::new();
        assert!(registry
            .remove_user_method(&MethodId::from(Classifier::Quantile))
            .is_err());
        assert!(registry.register_user_method(user("quantile")).is_err());
        assert!(registry.register_user_method(user("   ")).is_err());
        assert!(registry
            .register_user_method(MethodDescriptor::library(Classifier::Quantile))
            .is_err());
        assert!(matches!(
            registry.remove_user_method(&MethodId::new("nope")),
            Err(Error::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_filter() {
        let mut registry = MethodRegistry::new();
        registry.register_user_method(user("Mine")).unwrap();

        let iterative = MethodFilter::new().with_categories([MethodCategory::Iterative]);
        let names: Vec<_> = registry.filter(&iterative).map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Maximum Breaks", "Head/Tail Breaks", "CK-Means", "Fisher-Jenks"]
        );

        let search = MethodFilter::new().with_search("INTERVAL");
        assert_eq!(registry.filter(&search).count(), 4);

        let active = MethodFilter::new()
            .with_methods([MethodId::new("Mine"), MethodId::unclassed()])
            .with_categories([MethodCategory::UserDefined]);
        let ids: Vec<_> = registry.filter(&active).map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["Mine"]);
    }

    #[test]
    fn test_update() {
        let mut registry = MethodRegistry::new();
        let id = MethodId::from(Classifier::EqualInterval);
        let scale = Scale::threshold(vec![1.0], SchemeRef::new("viridis"));
        let sizes: BinSizes = vec![1, 2, 2].into_iter().collect();
        registry.update(&id, scale.clone(), sizes.clone()).unwrap();
        let d = registry.require(&id).unwrap();
        assert_eq!(d.scale, scale);
        assert_eq!(d.bin_sizes, sizes);
        assert!(registry
            .update(&MethodId::new("nope"), scale, sizes)
            .is_err());
    }
}
