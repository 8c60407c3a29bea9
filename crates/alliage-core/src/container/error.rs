//! # Alliage Core Container Errors
//!
//! Defines [`ContainerError`], raised when a frozen [`PrimitiveContainer`]
//! is asked to change.
//!
//! [`PrimitiveContainer`]: crate::container::PrimitiveContainer
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("The container is frozen: cannot {operation}{}", key.as_deref().map(|k| format!(" '{}'", k)).unwrap_or_default())]
    Frozen {
        operation: &'static str,
        key: Option<String>,
    },
}

impl ContainerError {
    pub(crate) fn frozen(operation: &'static str, key: Option<&str>) -> Self {
        ContainerError::Frozen {
            operation,
            key: key.map(|k| k.to_string()),
        }
    }
}
