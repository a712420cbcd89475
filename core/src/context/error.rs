//! Error types for context operations

use thiserror::Error;

use crate::combat_log::ActorId;

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),

    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors reported by a character name store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameStoreError {
    #[error("no character name stored for actor {id:#x}")]
    NotFound { id: ActorId },

    #[error("character store unavailable: {0}")]
    Unavailable(String),
}
