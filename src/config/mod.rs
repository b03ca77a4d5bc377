//! Configuration loading and validation for the logging subsystem.
//!
//! Uses serde_json to decode JSON configuration files, with support for an
//! optional environment-driven substitution pass over the raw bytes and
//! validation of every referenced plugin against a [`Registry`].

mod error;
mod level;
mod substitute;

pub use error::ConfigError;
pub use level::{Level, ParseLevelError};
pub use substitute::{EnvJsonSubstitutor, SubstituteError, Substitutor};

use crate::plugin::Options;
use crate::registry::{Binding, Registry};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, env, fs, path::Path};
use tracing::debug;

/// Runtime environment assumed when the selector variable is unset.
pub const DEFAULT_RUN_ENV: &str = "development";

/// Names of the environment variables driving runtime-environment
/// selection and JSON pre-substitution. An empty string disables the
/// corresponding feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environments {
    /// Variable whose value selects the active runtime environment.
    pub run_env: String,
    /// Substitution source key for the pre-decode templating pass.
    pub env_json: String,
}

/// Reference to a registered plugin plus its opaque options bag.
///
/// Shared shape for writer, hook, and formatter references. An empty name
/// means "not configured"; the options bag is handed verbatim to the named
/// constructor and never inspected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    pub name: String,
    pub options: Options,
}

/// Settings for one logger in one runtime environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output writer.
    pub out: ComponentConfig,
    /// Severity level string, parsed against [`Level`] at validation.
    pub level: String,
    /// Hooks in invocation order.
    pub hooks: Vec<ComponentConfig>,
    pub formatter: ComponentConfig,
}

/// A named logger and its per-environment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerItem {
    pub name: String,
    /// Environment name to settings for that environment.
    pub config: HashMap<String, LoggerConfig>,
}

impl LoggerItem {
    /// Settings for the given runtime environment, if configured.
    pub fn for_env(&self, env: &str) -> Option<&LoggerConfig> {
        self.config.get(env)
    }
}

/// Root configuration: environment selector keys plus the logger list.
///
/// Built once by a load call, validated once, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub env_keys: Environments,
    pub loggers: Vec<LoggerItem>,
}

impl Config {
    /// Load configuration from a JSON file at the given path.
    ///
    /// Loads environment variables from a `.env` file first (if one
    /// exists) so substitution sources can live there.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let data = fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "config file read");

        Self::load_from_bytes(&data)
    }

    /// Decode configuration from raw JSON bytes, applying the default
    /// substitution convention when the config asks for one.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        Self::load_from_bytes_with(data, &EnvJsonSubstitutor::default())
    }

    /// Decode with an explicit substitution implementation.
    ///
    /// A scratch decode inspects `env_keys.env_json` first; when that key
    /// is empty the scratch result is the final one and no substitution
    /// runs. Otherwise the pass rewrites the raw bytes and the rewritten
    /// document is decoded.
    pub fn load_from_bytes_with(
        data: &[u8],
        substitutor: &dyn Substitutor,
    ) -> Result<Self, ConfigError> {
        let scratch: Config = serde_json::from_slice(data)?;

        if scratch.env_keys.env_json.is_empty() {
            return Ok(scratch);
        }

        let expanded = substitutor.substitute(data, &scratch.env_keys.env_json)?;
        debug!(key = %scratch.env_keys.env_json, "substitution applied");

        Ok(serde_json::from_slice(&expanded)?)
    }

    /// Encode back to JSON bytes. Round trips are value-identical, not
    /// byte-identical, since map key order is unspecified.
    pub fn serialize(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// The logger item with the given name, if present.
    pub fn logger(&self, name: &str) -> Option<&LoggerItem> {
        self.loggers.iter().find(|logger| logger.name == name)
    }

    /// Active runtime environment, read from the process variable named by
    /// `env_keys.run_env` at call time. Unset or empty (including an empty
    /// selector key) falls back to [`DEFAULT_RUN_ENV`]. Never checked
    /// against the environment names present in the config.
    pub fn run_env(&self) -> String {
        if self.env_keys.run_env.is_empty() {
            return DEFAULT_RUN_ENV.to_string();
        }
        match env::var(&self.env_keys.run_env) {
            Ok(value) if !value.is_empty() => value,
            _ => DEFAULT_RUN_ENV.to_string(),
        }
    }

    /// Validate every logger entry against the registry.
    ///
    /// Fail-fast: the first problem aborts the walk. Per (environment,
    /// logger) entry the level string is parsed first, then every hook in
    /// order, then the formatter and writer when their names are
    /// non-empty. A name registered without a constructor is reported as
    /// damaged, distinct from never registered.
    pub fn validate(&self, registry: &Registry) -> Result<(), ConfigError> {
        for logger in &self.loggers {
            for (env_name, conf) in &logger.config {
                conf.level.parse::<Level>()?;

                for (id, hook) in conf.hooks.iter().enumerate() {
                    match registry.hook(&hook.name) {
                        Binding::Missing => {
                            return Err(ConfigError::HookNotRegistered {
                                env: env_name.clone(),
                                id,
                                name: hook.name.clone(),
                            });
                        }
                        Binding::Damaged => {
                            return Err(ConfigError::HookDamaged {
                                env: env_name.clone(),
                                id,
                                name: hook.name.clone(),
                            });
                        }
                        Binding::Bound(_) => {}
                    }
                }

                if !conf.formatter.name.is_empty() {
                    match registry.formatter(&conf.formatter.name) {
                        Binding::Missing => {
                            return Err(ConfigError::FormatterNotRegistered {
                                env: env_name.clone(),
                                name: conf.formatter.name.clone(),
                            });
                        }
                        Binding::Damaged => {
                            return Err(ConfigError::FormatterDamaged {
                                env: env_name.clone(),
                                name: conf.formatter.name.clone(),
                            });
                        }
                        Binding::Bound(_) => {}
                    }
                }

                if !conf.out.name.is_empty() {
                    match registry.writer(&conf.out.name) {
                        Binding::Missing => {
                            return Err(ConfigError::WriterNotRegistered {
                                env: env_name.clone(),
                                name: conf.out.name.clone(),
                            });
                        }
                        Binding::Damaged => {
                            return Err(ConfigError::WriterDamaged {
                                env: env_name.clone(),
                                name: conf.out.name.clone(),
                            });
                        }
                        Binding::Bound(_) => {}
                    }
                }
            }
        }
        Ok(())
    }
}
