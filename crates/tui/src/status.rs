//! Transient status messages.

use chrono::{DateTime, TimeDelta, Utc};

/// How long a message stays on screen.
pub const MESSAGE_LIFETIME: TimeDelta = TimeDelta::seconds(3);

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// An operation succeeded.
    Success,
    /// Input was rejected.
    Warning,
    /// An operation failed.
    Error,
    /// Informational, such as reminders.
    Info,
}

/// A message shown in the status bar for [`MESSAGE_LIFETIME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub kind: MessageKind,
    /// When the message was set.
    pub set_at: DateTime<Utc>,
}

impl StatusMessage {
    /// Creates a message stamped with `now`.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: MessageKind, now: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            kind,
            set_at: now,
        }
    }

    /// Whether the message should still be shown at `now`.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now - self.set_at < MESSAGE_LIFETIME
    }
}
