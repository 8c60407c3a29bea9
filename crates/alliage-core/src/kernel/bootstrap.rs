use crate::container::{ContainerData, PrimitiveContainer};
use crate::kernel::error::Result;
use crate::kernel::lifecycle::LifecyclePhase;
use crate::kernel::resolver::ModuleResolver;
use crate::module_system::ModuleMap;
use crate::utils::arguments::Arguments;

/// Module dependency resolver and lifecycle event dispatcher.
///
/// The kernel owns the module map and one shared container for its whole
/// lifetime. Each phase call performs a fresh resolution pass, so module
/// instances never survive from one phase call to the next, while the
/// container does.
#[derive(Debug)]
pub struct Kernel {
    modules: ModuleMap,
    container: PrimitiveContainer,
}

impl Kernel {
    /// Creates a kernel over `modules`, seeding the shared container with `data`.
    pub fn new(modules: ModuleMap, data: ContainerData) -> Self {
        log::debug!("Creating kernel with {} module(s)", modules.len());
        Self {
            modules,
            container: PrimitiveContainer::with_data(data),
        }
    }

    pub fn modules(&self) -> &ModuleMap {
        &self.modules
    }

    /// The shared container. Reads are always legal.
    pub fn container(&self) -> &PrimitiveContainer {
        &self.container
    }

    /// Runs `init` then `install` handlers
    pub async fn install(&mut self, args: &Arguments, env: &str) -> Result<()> {
        self.trigger(LifecyclePhase::Install, args, env).await
    }

    /// Runs `init` then `build` handlers
    pub async fn build(&mut self, args: &Arguments, env: &str) -> Result<()> {
        self.trigger(LifecyclePhase::Build, args, env).await
    }

    /// Runs `init` then `run` handlers
    pub async fn run(&mut self, args: &Arguments, env: &str) -> Result<()> {
        self.trigger(LifecyclePhase::Run, args, env).await
    }

    /// Names of the modules enabled for `env`, in registration order.
    ///
    /// A module with no declared environments is enabled everywhere.
    pub fn module_names_for_env(&self, env: &str) -> Vec<String> {
        self.modules
            .iter()
            .filter(|(_, descriptor)| descriptor.applies_to(env))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Runs one lifecycle phase end to end.
    ///
    /// Handlers run one after another; the first error aborts the phase and
    /// is returned as is. Handlers that already ran are not rolled back.
    pub async fn trigger(&mut self, phase: LifecyclePhase, args: &Arguments, env: &str) -> Result<()> {
        log::info!("Triggering {} in environment '{}'", phase, env);

        let module_names = self.module_names_for_env(env);
        let handlers = ModuleResolver::new(&self.modules, phase, env).resolve(&module_names)?;

        let context = phase.initialization_context();
        for (module, handler) in &handlers.init {
            log::debug!("Running init handler of '{}' ({})", module, context);
            handler(args, env, &mut self.container, context).await?;
        }

        self.container.freeze();

        for (module, handler) in &handlers.phase {
            log::debug!("Running {} handler of '{}'", phase, module);
            handler(args, env, &mut self.container).await?;
        }

        log::info!(
            "Completed {}: {} init handler(s), {} {} handler(s)",
            phase,
            handlers.init.len(),
            handlers.phase.len(),
            phase
        );
        Ok(())
    }
}
