use std::path::PathBuf;

use alliage_core::kernel::constants::{DEFAULT_ENVIRONMENT, DEFAULT_MODULES_FILE};
use alliage_core::{Arguments, Script};
use clap::{Parser, ValueEnum};

/// Alliage: a modular application framework
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Script to execute
    #[arg(value_enum)]
    pub script: ScriptArg,

    /// Environment the modules are loaded for
    #[arg(long, short, default_value = DEFAULT_ENVIRONMENT)]
    pub env: String,

    /// Module definitions file (.toml, .json, .yaml or .yml)
    #[arg(long, short, default_value = DEFAULT_MODULES_FILE)]
    pub modules: PathBuf,

    /// Log filter handed to the core-logging module, overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,

    /// Arguments left for the modules to parse
    #[arg(last = true)]
    pub rest: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptArg {
    Install,
    Build,
    Run,
}

impl From<ScriptArg> for Script {
    fn from(arg: ScriptArg) -> Self {
        match arg {
            ScriptArg::Install => Script::Install,
            ScriptArg::Build => Script::Build,
            ScriptArg::Run => Script::Run,
        }
    }
}

impl CliArgs {
    pub fn script(&self) -> Script {
        self.script.into()
    }

    /// The argument bag handed to every lifecycle handler
    pub fn to_arguments(&self) -> Arguments {
        let script = self.script();
        let mut arguments = Arguments::new(&format!("alliage {}", script))
            .with_value("script", script.as_str())
            .with_value("env", &self.env)
            .with_remaining(self.rest.iter().cloned());
        if let Some(level) = &self.log_level {
            arguments = arguments.with_value(core_logging::LOG_LEVEL_ARG, level);
        }
        arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["alliage", "run"]).unwrap();
        assert_eq!(args.script(), Script::Run);
        assert_eq!(args.env, DEFAULT_ENVIRONMENT);
        assert_eq!(args.modules, PathBuf::from(DEFAULT_MODULES_FILE));
        assert!(args.log_level.is_none());
        assert!(args.rest.is_empty());
    }

    #[test]
    fn test_to_arguments() {
        let args = CliArgs::try_parse_from([
            "alliage", "build", "--env", "dev", "--log-level", "debug", "--", "--target", "web",
        ])
        .unwrap();

        let arguments = args.to_arguments();
        assert_eq!(arguments.command(), "alliage build");
        assert_eq!(arguments.get("script"), Some("build"));
        assert_eq!(arguments.get("env"), Some("dev"));
        assert_eq!(arguments.get("log-level"), Some("debug"));
        assert_eq!(arguments.remaining_args(), ["--target".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_unknown_script_is_rejected() {
        assert!(CliArgs::try_parse_from(["alliage", "deploy"]).is_err());
    }
}
