//! User notifications
//!
//! Handlers report outcomes as [`Notification`]s. Each one is logged via
//! `tracing` at the matching level and kept in the session's log.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Message,
    /// Rejected input, nothing changed
    Warning,
    /// Operation failed
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Message => "message",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// User-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// How the dashboard presents it
    pub severity: Severity,
    /// Message shown to the user
    pub text: String,
    /// When it was raised
    pub at: DateTime<Utc>,
}

impl Notification {
    /// Create notification stamped now
    #[must_use]
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            at: Utc::now(),
        }
    }

    /// Informational notification
    #[inline]
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::new(Severity::Message, text)
    }

    /// Warning notification
    #[inline]
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Error notification
    #[inline]
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }

    /// "Please enter a valid database name."
    #[must_use]
    pub fn empty_name() -> Self {
        Self::warning("Please enter a valid database name.")
    }

    /// "Database '{name}' is already in the list."
    #[must_use]
    pub fn duplicate(name: &str) -> Self {
        Self::warning(format!("Database '{name}' is already in the list."))
    }

    /// "Database '{name}' added."
    #[must_use]
    pub fn added(name: &str) -> Self {
        Self::message(format!("Database '{name}' added."))
    }

    /// "{EXT} file uploaded successfully."
    #[must_use]
    pub fn upload_succeeded(extension: &str) -> Self {
        Self::message(format!(
            "{} file uploaded successfully.",
            extension.to_uppercase()
        ))
    }

    /// "Error reading {EXT} file: {reason}"
    #[must_use]
    pub fn upload_failed(extension: &str, reason: &dyn Display) -> Self {
        Self::error(format!(
            "Error reading {} file: {reason}",
            extension.to_uppercase()
        ))
    }

    fn trace(&self) {
        match self.severity {
            Severity::Message => tracing::info!(text = %self.text, "notification"),
            Severity::Warning => tracing::warn!(text = %self.text, "notification"),
            Severity::Error => tracing::error!(text = %self.text, "notification"),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// Append-only notification log
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Create empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and trace a notification, returning a copy
    pub fn push(&mut self, notification: Notification) -> Notification {
        notification.trace();
        self.entries.push(notification.clone());
        notification
    }

    /// All notifications, oldest first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Most recent notification
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Notification> {
        self.entries.last()
    }

    /// Remove and return all notifications
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    /// Number of notifications
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if log is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
