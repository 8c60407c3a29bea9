//! # Alliage Core
//!
//! Bootstrapping kernel of the Alliage module framework. Modules are declared
//! by name together with their dependencies and the environments they apply
//! to; the [`Kernel`] resolves them in dependency order and fires the
//! `init` event followed by one of the `install`, `build` or `run` phases.
pub mod container;
pub mod kernel;
pub mod module_system;
pub mod script;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and modules
pub use container::{ContainerData, ContainerError, PrimitiveContainer};
pub use kernel::Kernel;
pub use kernel::error::Error as KernelError;
pub use kernel::lifecycle::{InitializationContext, LifecycleEvent, LifecycleHandlers, LifecyclePhase};
pub use module_system::{Module, ModuleDescriptor, ModuleFactoryRegistry, ModuleMap, ModulesDefinition};
pub use script::{Script, ScriptRunner};
pub use utils::arguments::Arguments;
