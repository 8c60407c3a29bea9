use alliage_core::kernel::error::{Error as KernelError, Result as KernelResult};
use alliage_core::kernel::lifecycle::{sync_init_handler, LifecycleEvent, LifecycleHandlers};
use alliage_core::module_system::Module;
use alliage_core::Arguments;
use log::info;
use tracing_subscriber::EnvFilter;

/// Reference of this module in definitions files
pub const MODULE_REFERENCE: &str = "core-logging";

/// Container key holding the active filter
pub const LOG_LEVEL_KEY: &str = "logging.level";

/// Argument overriding `RUST_LOG`
pub const LOG_LEVEL_ARG: &str = "log-level";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs the process-wide tracing subscriber during `init` and publishes
/// the filter it uses under [`LOG_LEVEL_KEY`].
#[derive(Default)]
pub struct LoggingModule;

impl Module for LoggingModule {
    fn lifecycle_handlers(&self) -> LifecycleHandlers {
        LifecycleHandlers::new().on_init(sync_init_handler(|args, _env, container, context| {
            let filter = log_filter(args, std::env::var("RUST_LOG").ok());
            let installed = install_subscriber(&filter)?;
            container.set(LOG_LEVEL_KEY, filter.clone())?;
            if installed {
                info!("Logging initialised with filter '{}' ({})", filter, context);
            }
            Ok(())
        }))
    }
}

/// Filter to use: the `log-level` argument, then `rust_log`, then [`DEFAULT_LOG_LEVEL`]
pub fn log_filter(args: &Arguments, rust_log: Option<String>) -> String {
    args.get(LOG_LEVEL_ARG)
        .map(str::to_string)
        .or(rust_log)
        .map(|filter| filter.trim().to_string())
        .filter(|filter| !filter.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Install a stderr fmt subscriber and route `log` records into it.
///
/// Returns `Ok(false)` when a global subscriber is already set, which happens
/// whenever the kernel runs more than one phase in the same process.
pub fn install_subscriber(filter: &str) -> KernelResult<bool> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| {
        KernelError::handler(
            MODULE_REFERENCE,
            LifecycleEvent::Init,
            format!("invalid log filter '{}': {}", filter, e),
        )
    })?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::debug!("Global tracing subscriber already installed, keeping it");
        return Ok(false);
    }

    if let Err(e) = tracing_log::LogTracer::init() {
        log::debug!("log records already routed elsewhere: {}", e);
    }
    Ok(true)
}
