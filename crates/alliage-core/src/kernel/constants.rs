/// Application name
pub const APP_NAME: &str = "Alliage";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default module definitions file, looked up in the working directory
pub const DEFAULT_MODULES_FILE: &str = "alliage-modules.toml";

/// Environment used when none is given on the command line
pub const DEFAULT_ENVIRONMENT: &str = "production";
