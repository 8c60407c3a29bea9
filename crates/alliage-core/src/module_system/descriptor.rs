use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::module_system::error::ModuleSystemError;
use crate::module_system::manifest::ModulesDefinition;
use crate::module_system::registry::ModuleFactoryRegistry;
use crate::module_system::traits::{factory_of, Module, ModuleFactory};

/// Factory, dependencies and applicable environments of one named module
#[derive(Clone)]
pub struct ModuleDescriptor {
    /// Constructor invoked once per resolution pass
    pub factory: ModuleFactory,

    /// Modules that must be fully loaded first, in declaration order
    pub dependencies: Vec<String>,

    /// Environments the module loads in. Empty means every environment.
    pub environments: Vec<String>,
}

impl fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("dependencies", &self.dependencies)
            .field("environments", &self.environments)
            .finish_non_exhaustive()
    }
}

impl ModuleDescriptor {
    /// Create a descriptor with no dependencies, enabled everywhere
    pub fn new(factory: ModuleFactory) -> Self {
        Self {
            factory,
            dependencies: Vec::new(),
            environments: Vec::new(),
        }
    }

    /// Create a descriptor from a closure
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Box<dyn Module> + Send + Sync + 'static,
    {
        Self::new(Arc::new(f))
    }

    /// Create a descriptor for a `Default` module type
    pub fn of<M>() -> Self
    where
        M: Module + Default + 'static,
    {
        Self::new(factory_of::<M>())
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the module loads in `env`
    pub fn applies_to(&self, env: &str) -> bool {
        self.environments.is_empty() || self.environments.iter().any(|e| e == env)
    }

    /// Build a fresh module instance
    pub fn instantiate(&self) -> Box<dyn Module> {
        (self.factory)()
    }
}

/// Mapping from unique module name to descriptor, in registration order
#[derive(Clone, Default)]
pub struct ModuleMap {
    descriptors: HashMap<String, ModuleDescriptor>,
    order: Vec<String>,
}

impl fmt::Debug for ModuleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under `name`
    pub fn insert(&mut self, name: &str, descriptor: ModuleDescriptor) -> Result<&mut Self, ModuleSystemError> {
        if self.descriptors.contains_key(name) {
            return Err(ModuleSystemError::DuplicateModule { name: name.to_string() });
        }
        self.descriptors.insert(name.to_string(), descriptor);
        self.order.push(name.to_string());
        Ok(self)
    }

    /// Chaining variant of [`insert`](Self::insert) for building maps inline
    pub fn with_module(mut self, name: &str, descriptor: ModuleDescriptor) -> Result<Self, ModuleSystemError> {
        self.insert(name, descriptor)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.descriptors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Module names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Iterate over names and descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleDescriptor)> {
        self.order
            .iter()
            .filter_map(|name| self.descriptors.get(name).map(|d| (name.as_str(), d)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build a map from parsed definitions, resolving each module reference
    /// through `registry`.
    ///
    /// Fails on the first reference with no registered factory, before any
    /// kernel gets to see the map. Dependency names are not checked here; an
    /// unknown dependency is reported by the kernel when it is reached.
    pub fn from_definitions(
        definitions: &ModulesDefinition,
        registry: &ModuleFactoryRegistry,
    ) -> Result<Self, ModuleSystemError> {
        let mut map = ModuleMap::new();
        for (name, definition) in definitions.iter() {
            if definition.module.trim().is_empty() {
                return Err(ModuleSystemError::InvalidDefinition {
                    module: name.to_string(),
                    reason: "missing module reference".to_string(),
                });
            }
            let factory = registry.get(&definition.module).ok_or_else(|| ModuleSystemError::UnknownFactory {
                module: name.to_string(),
                reference: definition.module.clone(),
            })?;
            let descriptor = ModuleDescriptor::new(factory)
                .with_dependencies(definition.deps.iter().cloned())
                .with_environments(definition.envs.iter().cloned());
            map.insert(name, descriptor)?;
        }
        log::debug!("Built module map with {} module(s)", map.len());
        Ok(map)
    }
}
