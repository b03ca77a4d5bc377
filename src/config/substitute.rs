//! Optional environment-driven templating applied to raw JSON bytes
//! before decoding. Late-binds secrets and per-deployment values without
//! committing them to the config file.

use serde_json::Value;
use std::env;
use thiserror::Error;

/// Substitution pass failure.
#[derive(Debug, Error)]
pub enum SubstituteError {
    /// The environment variable named by the substitution key is unset.
    #[error("substitution source {0} is not set")]
    SourceMissing(String),

    /// The source variable's value is not valid JSON.
    #[error("substitution source {key} is not valid JSON: {source}")]
    SourceMalformed {
        key: String,
        source: serde_json::Error,
    },

    /// The source variable parsed, but not to a JSON object.
    #[error("substitution source {0} is not a JSON object")]
    SourceNotObject(String),

    /// A marker names an entry absent from the source object.
    #[error("no substitution value for {0}")]
    UnknownVariable(String),

    /// Raw config bytes were not UTF-8.
    #[error("config data is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Text transform run over raw config bytes before decoding. `key` is the
/// substitution source named by the config's `env_keys.env_json` field.
/// Swappable so tests and embedders can supply their own convention.
pub trait Substitutor {
    fn substitute(&self, data: &[u8], key: &str) -> Result<Vec<u8>, SubstituteError>;
}

/// Default substitution convention: the process environment variable named
/// by `key` holds a JSON object, and each `{{name}}` marker in the raw
/// bytes is replaced by that object's `name` entry. String values are
/// spliced verbatim, other values as their JSON text.
pub struct EnvJsonSubstitutor {
    open: &'static str,
    close: &'static str,
}

impl EnvJsonSubstitutor {
    /// Substitutor with a custom marker delimiter pair.
    pub fn with_delimiters(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

impl Default for EnvJsonSubstitutor {
    fn default() -> Self {
        Self::with_delimiters("{{", "}}")
    }
}

impl Substitutor for EnvJsonSubstitutor {
    fn substitute(&self, data: &[u8], key: &str) -> Result<Vec<u8>, SubstituteError> {
        let raw = env::var(key).map_err(|_| SubstituteError::SourceMissing(key.to_string()))?;
        let parsed: Value =
            serde_json::from_str(&raw).map_err(|source| SubstituteError::SourceMalformed {
                key: key.to_string(),
                source,
            })?;
        let values = parsed
            .as_object()
            .ok_or_else(|| SubstituteError::SourceNotObject(key.to_string()))?;

        let text = std::str::from_utf8(data)?;
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(self.open) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.open.len()..];
            let Some(end) = after.find(self.close) else {
                // Unterminated marker, emit the tail verbatim.
                out.push_str(&rest[start..]);
                return Ok(out.into_bytes());
            };

            let name = after[..end].trim();
            match values.get(name) {
                Some(Value::String(s)) => out.push_str(s),
                Some(value) => out.push_str(&value.to_string()),
                None => return Err(SubstituteError::UnknownVariable(name.to_string())),
            }
            rest = &after[end + self.close.len()..];
        }

        out.push_str(rest);
        Ok(out.into_bytes())
    }
}
