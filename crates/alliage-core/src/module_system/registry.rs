use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::module_system::error::ModuleSystemError;
use crate::module_system::traits::{factory_of, Module, ModuleFactory};

/// Registry of module factories keyed by the reference used in definitions files
#[derive(Default, Clone)]
pub struct ModuleFactoryRegistry {
    factories: HashMap<String, ModuleFactory>,
}

impl fmt::Debug for ModuleFactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleFactoryRegistry")
            .field("references", &self.references())
            .finish()
    }
}

impl ModuleFactoryRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `reference`
    pub fn register(&mut self, reference: &str, factory: ModuleFactory) -> Result<&mut Self, ModuleSystemError> {
        if self.factories.contains_key(reference) {
            return Err(ModuleSystemError::DuplicateFactory {
                reference: reference.to_string(),
            });
        }
        log::debug!("Registered module factory '{}'", reference);
        self.factories.insert(reference.to_string(), factory);
        Ok(self)
    }

    /// Register a closure as factory
    pub fn register_fn<F>(&mut self, reference: &str, f: F) -> Result<&mut Self, ModuleSystemError>
    where
        F: Fn() -> Box<dyn Module> + Send + Sync + 'static,
    {
        self.register(reference, Arc::new(f))
    }

    /// Register a `Default` module type
    pub fn register_type<M>(&mut self, reference: &str) -> Result<&mut Self, ModuleSystemError>
    where
        M: Module + Default + 'static,
    {
        self.register(reference, factory_of::<M>())
    }

    pub fn get(&self, reference: &str) -> Option<ModuleFactory> {
        self.factories.get(reference).cloned()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.factories.contains_key(reference)
    }

    /// Registered references, sorted
    pub fn references(&self) -> Vec<String> {
        let mut references: Vec<String> = self.factories.keys().cloned().collect();
        references.sort();
        references
    }
}
