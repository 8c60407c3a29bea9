use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::module_system::error::ModuleSystemError;

/// Supported module definitions file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefinitionFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl DefinitionFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            DefinitionFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            DefinitionFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            DefinitionFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(DefinitionFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(DefinitionFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(DefinitionFormat::Toml),
                _ => None,
            })
    }
}

/// Declaration of one module in a definitions file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Reference of the factory building the module
    pub module: String,

    /// Names of the modules this one depends on
    #[serde(default)]
    pub deps: Vec<String>,

    /// Environments the module is enabled in. Empty means every environment.
    #[serde(default)]
    pub envs: Vec<String>,
}

impl ModuleDefinition {
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            deps: Vec::new(),
            envs: Vec::new(),
        }
    }
}

/// Parsed module definitions file: module name -> definition, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulesDefinition {
    modules: IndexMap<String, ModuleDefinition>,
}

impl ModulesDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, or replace one in place
    pub fn insert(&mut self, name: &str, definition: ModuleDefinition) -> &mut Self {
        self.modules.insert(name.to_string(), definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDefinition> {
        self.modules.get(name)
    }

    /// Iterate over definitions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleDefinition)> {
        self.modules.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Parse definitions from a string in the given format
    pub fn parse(content: &str, format: DefinitionFormat) -> Result<Self, ModuleSystemError> {
        match format {
            DefinitionFormat::Json => serde_json::from_str(content).map_err(|e| ModuleSystemError::DeserializationError {
                format: "JSON".to_string(),
                source: Box::new(e),
            }),
            #[cfg(feature = "yaml-config")]
            DefinitionFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ModuleSystemError::DeserializationError {
                format: "YAML".to_string(),
                source: Box::new(e),
            }),
            #[cfg(feature = "toml-config")]
            DefinitionFormat::Toml => toml::from_str(content).map_err(|e| ModuleSystemError::DeserializationError {
                format: "TOML".to_string(),
                source: Box::new(e),
            }),
        }
    }

    /// Load definitions from a file, picking the format from its extension
    pub async fn load(path: &Path) -> Result<Self, ModuleSystemError> {
        let format = DefinitionFormat::from_path(path)
            .ok_or_else(|| ModuleSystemError::UnsupportedDefinitionsFormat(path.to_path_buf()))?;

        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModuleSystemError::DefinitionsNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(ModuleSystemError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let definitions = Self::parse(&content, format)?;
        log::info!(
            "Loaded {} module definition(s) from {}",
            definitions.len(),
            path.display()
        );
        Ok(definitions)
    }
}
