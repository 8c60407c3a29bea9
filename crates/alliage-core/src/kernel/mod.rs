//! # Alliage Core Kernel
//!
//! The `kernel` module is the heart of `alliage-core`. It resolves the declared
//! modules in dependency order and dispatches lifecycle events across them.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Dispatch**: [`Kernel`](bootstrap::Kernel) runs one lifecycle phase end to
//!   end: every `init` handler, then a container freeze, then the phase handlers.
//! - **Resolution**: [`ModuleResolver`](resolver::ModuleResolver) walks the
//!   dependency graph depth-first, instantiating each module at most once and
//!   detecting cycles and unknown module names.
//! - **Lifecycle contract**: events, phases and handler types live in the
//!   `lifecycle` submodule.
//! - **Core Constants**: defaults shared with the script layer and the CLI.
//! - **Error Handling**: [`Error`](error::Error) and the `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod resolver;

pub use bootstrap::Kernel;
pub use error::{Error, Result};
pub use resolver::{CollectedHandlers, ModuleLoadState, ModuleResolver};
// Test module declaration
#[cfg(test)]
mod tests;
