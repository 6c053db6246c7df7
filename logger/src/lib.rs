use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use context::Context;
pub use error::ProcessorError;
pub use provider::{SeverityProvider, SeverityVar};
pub use severity::LogSeverity;

pub mod context;
pub mod error;
pub mod processors;
pub mod provider;
pub mod severity;

/// A stage that log records pass through.
///
/// Processors are shared between threads, so every method takes `&self`.
pub trait Processor: Send + Sync {
    fn on_emit(&self, ctx: &Context, record: &mut LogRecord) -> Result<(), ProcessorError>;

    /// Reports whether a record described by `params` would be processed.
    fn enabled(&self, ctx: &Context, params: &EnabledParameters) -> bool;

    fn shutdown(&self, ctx: &Context) -> Result<(), ProcessorError>;

    fn force_flush(&self, ctx: &Context) -> Result<(), ProcessorError>;

    /// Returns this processor as a [`FilterProcessor`] if its `enabled` is a filtering decision.
    fn as_filter(&self) -> Option<&dyn FilterProcessor> {
        None
    }
}

/// A processor whose `enabled` answer filters records, rather than only reporting liveness.
pub trait FilterProcessor: Processor {}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub time: DateTime<Local>,
    pub severity: LogSeverity,
    pub body: String,
    pub event_name: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new(severity: LogSeverity, body: impl Into<String>) -> Self {
        LogRecord {
            time: Local::now(),
            severity,
            body: body.into(),
            event_name: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn enabled_parameters(&self) -> EnabledParameters {
        EnabledParameters {
            severity: self.severity,
            event_name: self.event_name.clone(),
        }
    }
}

/// What an `enabled` query knows about a record before it is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnabledParameters {
    pub severity: LogSeverity,
    pub event_name: Option<String>,
}

impl EnabledParameters {
    pub fn new(severity: LogSeverity) -> Self {
        Self {
            severity,
            event_name: None,
        }
    }
}
