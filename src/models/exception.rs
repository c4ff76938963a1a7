//! # Captured Exceptions
//!
//! Errors raised by a task's own execution are not propagated as Rust errors.
//! The execution engine captures them as data and hands them back through a
//! completion handle; a failed job keeps them in order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One error raised while executing a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedException {
    /// Error type name, e.g. `ValueError` or `std::io::Error`
    pub kind: String,
    pub message: String,
    /// Pre-formatted backtrace captured by the execution engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
}

impl CapturedException {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// Capture any error value, walking its `source()` chain into the trace
    pub fn from_error<E>(kind: impl Into<String>, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut trace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push(format!("Caused by: {cause}"));
            source = cause.source();
        }

        let captured = Self::new(kind, err.to_string());
        if trace.is_empty() {
            captured
        } else {
            captured.with_backtrace(trace.join("\n"))
        }
    }

    /// Multi-line trace block for error logs.
    ///
    /// The backtrace (when present) comes first and the `kind: message`
    /// line closes the block.
    pub fn format_trace(&self) -> String {
        match &self.backtrace {
            Some(backtrace) => format!("{}\n{}", backtrace.trim_end(), self),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for CapturedException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
