//! Plugin constructor seams consumed by the registry.
//!
//! The logging objects themselves live outside this crate; these traits
//! are the minimal shapes a registered constructor produces from its
//! options bag.

use crate::config::Level;
use serde_json::Value;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Open, untyped options bag passed verbatim to a plugin constructor.
/// The loader never inspects its contents.
pub type Options = serde_json::Map<String, Value>;

/// Errors raised by plugin constructors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Options bag did not match the shape the plugin expects.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Underlying I/O failure while building the plugin.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Renders a log entry to bytes.
pub trait Formatter: Send + Sync {
    fn format(&self, level: Level, message: &str) -> Result<Vec<u8>, PluginError>;
}

/// Side-channel invoked for entries at the levels it declares.
pub trait Hook: Send + Sync {
    /// Levels this hook wants to observe.
    fn levels(&self) -> Vec<Level>;

    /// Invoked for each matching entry, in registration order.
    fn fire(&self, level: Level, message: &str) -> Result<(), PluginError>;
}

/// Destination for rendered output.
pub type Writer = Box<dyn io::Write + Send>;

/// Builds a formatter from an options bag.
pub type NewFormatterFn =
    Arc<dyn Fn(&Options) -> Result<Box<dyn Formatter>, PluginError> + Send + Sync>;

/// Builds a hook from an options bag.
pub type NewHookFn = Arc<dyn Fn(&Options) -> Result<Box<dyn Hook>, PluginError> + Send + Sync>;

/// Builds a writer from an options bag.
pub type NewWriterFn = Arc<dyn Fn(&Options) -> Result<Writer, PluginError> + Send + Sync>;
