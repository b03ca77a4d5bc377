//! Configuration loader for a pluggable logging subsystem.
//!
//! Decodes a JSON document describing, per named logger and per named
//! runtime environment, which output writer, severity level, formatter,
//! and hook plugins to activate, then validates every referenced plugin
//! name against an injected [`Registry`] before the caller wires up the
//! actual logging objects.

pub mod config;
pub mod plugin;
pub mod registry;

pub use config::{
    ComponentConfig, Config, ConfigError, DEFAULT_RUN_ENV, EnvJsonSubstitutor, Environments,
    Level, LoggerConfig, LoggerItem, ParseLevelError, SubstituteError, Substitutor,
};
pub use plugin::{
    Formatter, Hook, NewFormatterFn, NewHookFn, NewWriterFn, Options, PluginError, Writer,
};
pub use registry::{Binding, Registry};
