//! Diagnostic collection for a modeling run.
//!
//! The modeler never aborts on the first problem: it records what it
//! found, drops the construct it cannot model, and keeps going. The
//! driver inspects the collected severities once a pass is complete.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info<M: Into<String>>(&mut self, message: M) {
        let message = message.into();
        tracing::info!("{}", message);
        self.push(Severity::Info, message);
    }

    pub fn warning<M: Into<String>>(&mut self, message: M) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.push(Severity::Warning, message);
    }

    pub fn error<M: Into<String>>(&mut self, message: M) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(Severity::Error, message);
    }

    pub fn fatal<M: Into<String>>(&mut self, message: M) {
        let message = message.into();
        tracing::error!("{}", message);
        self.push(Severity::Fatal, message);
    }

    fn push(&mut self, severity: Severity, message: String) {
        self.entries.push(Diagnostic { severity, message });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.severity >= Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == Severity::Warning)
            .count()
    }
}
