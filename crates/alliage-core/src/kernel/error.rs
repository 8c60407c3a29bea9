//! # Alliage Core Kernel Errors
//!
//! Defines [`Error`], the error type returned by the kernel and by every
//! lifecycle handler. Subsystem errors (container, module system) convert
//! into it through `#[from]`, so handlers can use `?` directly on container
//! operations.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::container::error::ContainerError;
use crate::kernel::lifecycle::LifecycleEvent;
use crate::module_system::error::ModuleSystemError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The dependency graph contains a cycle passing through `module`
    #[error("Circular reference on {module}")]
    CircularReference { module: String },

    /// A module name, requested directly or as a dependency, is not registered
    #[error(
        "Unknown module \"{module}\".\nThis usually happens when a module relies on a dependency that has not been registered yet.\nPlease check your module definitions file"
    )]
    UnknownModule { module: String },

    /// Shared container error, typically a mutation after the freeze
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// Module registration or definitions loading error
    #[error("Module system error: {0}")]
    ModuleSystem(#[from] ModuleSystemError),

    /// Failure reported by a module's own lifecycle handler
    #[error("Module '{module}' failed during {event}: {message}")]
    Handler {
        module: String,
        event: LifecycleEvent,
        message: String,
    },
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    pub fn handler(module: impl Into<String>, event: LifecycleEvent, message: impl Into<String>) -> Self {
        Error::Handler {
            module: module.into(),
            event,
            message: message.into(),
        }
    }
}
