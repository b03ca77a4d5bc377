//! Configuration error types.

use super::level::ParseLevelError;
use super::substitute::SubstituteError;
use thiserror::Error;

/// Configuration loading or validation error. Every failure is fatal and
/// returned to the caller; nothing is recovered or logged internally.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("substitution failed: {0}")]
    Substitute(#[from] SubstituteError),

    #[error(transparent)]
    Level(#[from] ParseLevelError),

    #[error("hook not registered, env: {env}, id: {id}, name: {name}")]
    HookNotRegistered { env: String, id: usize, name: String },

    #[error("hook constructor damaged, env: {env}, id: {id}, name: {name}")]
    HookDamaged { env: String, id: usize, name: String },

    #[error("formatter not registered, env: {env}, name: {name}")]
    FormatterNotRegistered { env: String, name: String },

    #[error("formatter constructor damaged, env: {env}, name: {name}")]
    FormatterDamaged { env: String, name: String },

    #[error("writer not registered, env: {env}, name: {name}")]
    WriterNotRegistered { env: String, name: String },

    #[error("writer constructor damaged, env: {env}, name: {name}")]
    WriterDamaged { env: String, name: String },
}
