//! # Shared Container
//!
//! The [`PrimitiveContainer`] is the key/value store handed to every
//! lifecycle handler of a [`Kernel`](crate::kernel::Kernel). Modules use it
//! during `init` to publish data for the modules loaded after them. Right
//! before phase handlers run the kernel freezes it; from then on every
//! mutation fails with [`ContainerError::Frozen`] while reads stay legal.
pub mod error;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

pub use error::ContainerError;

/// Value stored in the container
pub type ContainerValue = Box<dyn Any + Send + Sync>;

/// Seed data used to pre-populate a container
pub type ContainerData = HashMap<String, ContainerValue>;

/// Mutable key/value store with a one-way freeze
#[derive(Default)]
pub struct PrimitiveContainer {
    values: HashMap<String, ContainerValue>,
    frozen: bool,
}

impl fmt::Debug for PrimitiveContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("PrimitiveContainer")
            .field("keys", &keys)
            .field("frozen", &self.frozen)
            .finish()
    }
}

impl PrimitiveContainer {
    /// Create an empty, unfrozen container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container seeded with the given entries
    pub fn with_data(data: ContainerData) -> Self {
        Self {
            values: data,
            frozen: false,
        }
    }

    /// Get a value by key.
    ///
    /// Returns `None` when the key is absent or holds a value of another type.
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Check whether a key is present, whatever the type of its value
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Insert or overwrite a value
    pub fn set<T: Any + Send + Sync>(&mut self, key: &str, value: T) -> Result<&mut Self, ContainerError> {
        self.ensure_mutable("set", Some(key))?;
        self.values.insert(key.to_string(), Box::new(value));
        Ok(self)
    }

    /// Remove a value if present
    pub fn delete(&mut self, key: &str) -> Result<&mut Self, ContainerError> {
        self.ensure_mutable("delete", Some(key))?;
        self.values.remove(key);
        Ok(self)
    }

    /// Remove every value
    pub fn clear(&mut self) -> Result<&mut Self, ContainerError> {
        self.ensure_mutable("clear", None)?;
        self.values.clear();
        Ok(self)
    }

    /// Freeze the container. Calling it again is a no-op.
    pub fn freeze(&mut self) {
        if !self.frozen {
            log::debug!("Freezing shared container ({} entries)", self.values.len());
        }
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    fn ensure_mutable(&self, operation: &'static str, key: Option<&str>) -> Result<(), ContainerError> {
        if self.frozen {
            return Err(ContainerError::frozen(operation, key));
        }
        Ok(())
    }
}
