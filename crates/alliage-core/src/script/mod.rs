//! # Scripts
//!
//! A script is one of the three top-level operations exposed to users
//! (`install`, `build`, `run`). [`ScriptRunner`] builds a [`Kernel`] from a
//! module definitions file and the factories registered at startup, then
//! maps each script onto the matching lifecycle phase.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::container::ContainerData;
use crate::kernel::error::Result;
use crate::kernel::lifecycle::LifecyclePhase;
use crate::kernel::Kernel;
use crate::module_system::{ModuleFactoryRegistry, ModuleMap, ModulesDefinition};
use crate::utils::arguments::Arguments;

/// Top-level script names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Install,
    Build,
    Run,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown script '{0}' (expected one of: install, build, run)")]
pub struct UnknownScriptError(pub String);

impl Script {
    pub fn all() -> [Script; 3] {
        [Script::Install, Script::Build, Script::Run]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Install => "install",
            Script::Build => "build",
            Script::Run => "run",
        }
    }

    /// The lifecycle phase this script triggers
    pub fn phase(&self) -> LifecyclePhase {
        match self {
            Script::Install => LifecyclePhase::Install,
            Script::Build => LifecyclePhase::Build,
            Script::Run => LifecyclePhase::Run,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Script {
    type Err = UnknownScriptError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Script::all()
            .into_iter()
            .find(|script| script.as_str() == s)
            .ok_or_else(|| UnknownScriptError(s.to_string()))
    }
}

/// Owns a kernel and executes scripts against it
#[derive(Debug)]
pub struct ScriptRunner {
    kernel: Kernel,
}

impl ScriptRunner {
    /// Create a runner over an already built module map
    pub fn new(modules: ModuleMap) -> Self {
        Self::with_container_data(modules, ContainerData::new())
    }

    /// Create a runner whose shared container is seeded with `data`
    pub fn with_container_data(modules: ModuleMap, data: ContainerData) -> Self {
        Self {
            kernel: Kernel::new(modules, data),
        }
    }

    /// Load the definitions file at `path` and resolve its module references
    /// through `registry`. Every reference is checked before the kernel is built.
    pub async fn load(path: &Path, registry: &ModuleFactoryRegistry) -> Result<Self> {
        let definitions = ModulesDefinition::load(path).await?;
        let modules = ModuleMap::from_definitions(&definitions, registry)?;
        Ok(Self::new(modules))
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Execute `script` with the given arguments and environment
    pub async fn execute(&mut self, script: Script, args: &Arguments, env: &str) -> Result<()> {
        log::info!("Executing script '{}' ({})", script, args.command());
        self.kernel.trigger(script.phase(), args, env).await
    }
}
