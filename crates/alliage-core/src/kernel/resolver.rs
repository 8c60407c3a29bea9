use std::collections::HashMap;
use std::fmt;

use crate::kernel::error::{Error, Result};
use crate::kernel::lifecycle::{InitHandler, LifecyclePhase, PhaseHandler};
use crate::module_system::ModuleMap;

/// Per-pass load state of a module. A module without an entry has not been visited yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleLoadState {
    Loading,
    Loaded,
}

/// Handlers gathered by one resolution pass, in dependency order.
///
/// Each handler is paired with the name of the module that provided it.
#[derive(Default)]
pub struct CollectedHandlers {
    pub init: Vec<(String, InitHandler)>,
    pub phase: Vec<(String, PhaseHandler)>,
}

impl fmt::Debug for CollectedHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let init: Vec<&str> = self.init.iter().map(|(name, _)| name.as_str()).collect();
        let phase: Vec<&str> = self.phase.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("CollectedHandlers")
            .field("init", &init)
            .field("phase", &phase)
            .finish()
    }
}

/// Depth-first resolver for one lifecycle phase.
///
/// A resolver is single use: its load states live for exactly one pass, so
/// every phase invocation gets fresh module instances.
pub struct ModuleResolver<'m> {
    modules: &'m ModuleMap,
    phase: LifecyclePhase,
    env: &'m str,
    states: HashMap<String, ModuleLoadState>,
    loaded_order: Vec<String>,
    handlers: CollectedHandlers,
}

impl<'m> ModuleResolver<'m> {
    pub fn new(modules: &'m ModuleMap, phase: LifecyclePhase, env: &'m str) -> Self {
        Self {
            modules,
            phase,
            env,
            states: HashMap::new(),
            loaded_order: Vec::new(),
            handlers: CollectedHandlers::default(),
        }
    }

    /// Resolve `names` and their dependencies, returning the collected handlers
    pub fn resolve(mut self, names: &[String]) -> Result<CollectedHandlers> {
        self.load_modules(names)?;
        log::debug!(
            "Resolved {} module(s) for {} in '{}': {}",
            self.loaded_order.len(),
            self.phase,
            self.env,
            self.loaded_order.join(", ")
        );
        Ok(self.handlers)
    }

    fn load_modules(&mut self, names: &[String]) -> Result<()> {
        let modules = self.modules;
        for name in names {
            match self.states.get(name) {
                Some(ModuleLoadState::Loaded) => continue,
                Some(ModuleLoadState::Loading) => {
                    return Err(Error::CircularReference { module: name.clone() });
                }
                None => {}
            }

            let descriptor = modules
                .get(name)
                .ok_or_else(|| Error::UnknownModule { module: name.clone() })?;

            // Only reachable through a dependency edge: top-level names are filtered by the kernel
            if !descriptor.applies_to(self.env) {
                log::warn!(
                    "Skipping module '{}': not enabled for environment '{}' (enabled for: {})",
                    name,
                    self.env,
                    descriptor.environments.join(", ")
                );
                continue;
            }

            self.states.insert(name.clone(), ModuleLoadState::Loading);

            if !descriptor.dependencies.is_empty() {
                self.load_modules(&descriptor.dependencies)?;
            }

            log::debug!("Instantiating module '{}'", name);
            let instance = descriptor.instantiate();
            let (init, phase_handler) = instance.lifecycle_handlers().into_parts(self.phase);
            if let Some(handler) = init {
                self.handlers.init.push((name.clone(), handler));
            }
            if let Some(handler) = phase_handler {
                self.handlers.phase.push((name.clone(), handler));
            }

            self.states.insert(name.clone(), ModuleLoadState::Loaded);
            self.loaded_order.push(name.clone());
        }
        Ok(())
    }
}
