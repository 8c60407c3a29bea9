use std::sync::Arc;

use crate::kernel::lifecycle::LifecycleHandlers;

/// Core trait that all modules must implement.
///
/// A module only has to list the lifecycle handlers it cares about; the
/// default implementation handles nothing.
pub trait Module: Send + Sync {
    /// The lifecycle event handlers this module implements
    fn lifecycle_handlers(&self) -> LifecycleHandlers {
        LifecycleHandlers::default()
    }
}

/// Zero-argument constructor of a module
pub type ModuleFactory = Arc<dyn Fn() -> Box<dyn Module> + Send + Sync>;

/// Create a factory for a `Default` module type
pub fn factory_of<M>() -> ModuleFactory
where
    M: Module + Default + 'static,
{
    Arc::new(|| Box::new(M::default()) as Box<dyn Module>)
}
