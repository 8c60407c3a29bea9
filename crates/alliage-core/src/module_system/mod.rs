//! # Alliage Core Module System
//!
//! Everything needed to turn declared module names into something the
//! [`Kernel`](crate::kernel::Kernel) can resolve:
//!
//! - [`Module`]: the contract every module implements.
//! - [`ModuleDescriptor`] / [`ModuleMap`]: factory, dependencies and
//!   environments of each named module.
//! - [`ModuleFactoryRegistry`]: references usable in a definitions file,
//!   registered at startup.
//! - [`ModulesDefinition`]: the parsed definitions file.
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod traits;

pub use descriptor::{ModuleDescriptor, ModuleMap};
pub use error::ModuleSystemError;
pub use manifest::{DefinitionFormat, ModuleDefinition, ModulesDefinition};
pub use registry::ModuleFactoryRegistry;
pub use traits::{Module, ModuleFactory};

// Test module declaration
#[cfg(test)]
mod tests;
