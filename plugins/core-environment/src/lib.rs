use std::collections::HashMap;
use std::path::{Path, PathBuf};

use alliage_core::kernel::error::Error as KernelError;
use alliage_core::kernel::lifecycle::{sync_phase_handler, InitializationContext, LifecycleHandlers};
use alliage_core::module_system::Module;
use log::info;
use serde::{Deserialize, Serialize};

/// Reference of this module in definitions files
pub const MODULE_REFERENCE: &str = "core-environment";

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

// Container keys
pub const NAME_KEY: &str = "environment.name";
pub const OS_KEY: &str = "environment.os";
pub const ARCH_KEY: &str = "environment.arch";
pub const OS_RELEASE_KEY: &str = "environment.os_release";
pub const CONTEXT_KEY: &str = "environment.context";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OsInfo {
    pub id: Option<String>,          // e.g., "ubuntu", "fedora"
    pub name: Option<String>,        // e.g., "Ubuntu", "Fedora Linux"
    pub version_id: Option<String>,  // e.g., "22.04"
    pub pretty_name: Option<String>, // e.g., "Ubuntu 22.04.3 LTS"
}

impl OsInfo {
    /// Parse the `KEY=value` lines of an os-release file
    pub fn parse(content: &str) -> Self {
        let mut vars = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    let value = value.trim().trim_matches('"').to_string();
                    vars.insert(key.trim().to_string(), value);
                }
                None => log::warn!("Ignoring malformed os-release line: {}", line),
            }
        }

        OsInfo {
            id: vars.remove("ID"),
            name: vars.remove("NAME"),
            version_id: vars.remove("VERSION_ID"),
            pretty_name: vars.remove("PRETTY_NAME"),
        }
    }
}

/// Reads OS information from `path`.
///
/// A missing or unreadable file yields an empty [`OsInfo`].
pub async fn read_os_release(path: &Path) -> OsInfo {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => OsInfo::parse(&content),
        Err(e) => {
            log::warn!("Could not read {}: {}. Proceeding with empty OS info.", path.display(), e);
            OsInfo::default()
        }
    }
}

/// Publishes the environment name, host platform, OS release and
/// initialization context during `init`, and reports them on `run`.
pub struct EnvironmentModule {
    os_release_path: PathBuf,
}

impl Default for EnvironmentModule {
    fn default() -> Self {
        Self::with_os_release_path(OS_RELEASE_PATH)
    }
}

impl EnvironmentModule {
    pub fn with_os_release_path(path: impl Into<PathBuf>) -> Self {
        Self {
            os_release_path: path.into(),
        }
    }
}

impl Module for EnvironmentModule {
    fn lifecycle_handlers(&self) -> LifecycleHandlers {
        let os_release_path = self.os_release_path.clone();
        LifecycleHandlers::new()
            .on_init(move |_args, env, container, context| {
                let path = os_release_path.clone();
                Box::pin(async move {
                    let os_info = read_os_release(&path).await;
                    container
                        .set(NAME_KEY, env.to_string())?
                        .set(OS_KEY, std::env::consts::OS.to_string())?
                        .set(ARCH_KEY, std::env::consts::ARCH.to_string())?
                        .set(OS_RELEASE_KEY, os_info)?
                        .set(CONTEXT_KEY, context)?;
                    Ok::<(), KernelError>(())
                })
            })
            .on_run(sync_phase_handler(|_args, env, container| {
                let os = container.get::<String>(OS_KEY).map(String::as_str).unwrap_or("unknown");
                let arch = container.get::<String>(ARCH_KEY).map(String::as_str).unwrap_or("unknown");
                let os_info = container.get::<OsInfo>(OS_RELEASE_KEY).cloned().unwrap_or_default();
                let context = container
                    .get::<InitializationContext>(CONTEXT_KEY)
                    .map(ToString::to_string)
                    .unwrap_or_default();

                info!(
                    "Environment '{}' on {}/{} ({}), initialized for {}",
                    env,
                    os,
                    arch,
                    os_info.pretty_name.as_deref().unwrap_or("unknown distribution"),
                    context
                );
                if let Ok(json) = serde_json::to_string(&os_info) {
                    log::debug!("OS release info: {}", json);
                }
                Ok(())
            }))
    }
}
