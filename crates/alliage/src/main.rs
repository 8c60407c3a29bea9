mod cli; // Declare the cli module

use std::process::ExitCode;

use alliage_core::kernel::constants::{APP_NAME, APP_VERSION};
use alliage_core::kernel::error::Result as KernelResult;
use alliage_core::{ModuleFactoryRegistry, ScriptRunner};
use clap::Parser;
use log::info;

use cli::CliArgs;

// --- Built-in modules ---
use core_environment::EnvironmentModule;
use core_logging::LoggingModule;

/// Factories every definitions file can reference
fn builtin_registry() -> KernelResult<ModuleFactoryRegistry> {
    let mut registry = ModuleFactoryRegistry::new();
    registry
        .register_type::<LoggingModule>(core_logging::MODULE_REFERENCE)?
        .register_type::<EnvironmentModule>(core_environment::MODULE_REFERENCE)?;
    Ok(registry)
}

async fn run(args: CliArgs) -> KernelResult<()> {
    let registry = builtin_registry()?;
    let mut runner = ScriptRunner::load(&args.modules, &registry).await?;
    let script = args.script();
    runner.execute(script, &args.to_arguments(), &args.env).await?;
    info!("{} v{}: '{}' finished", APP_NAME, APP_VERSION, script);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
