//! The page status banner.
//!
//! Each page owns exactly one [`Banner`]. Showing a message replaces whatever
//! was there; success messages expire on their own, info and error messages
//! stay until replaced or cleared.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn expires(self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    shown_at: Instant,
}

/// Single-slot status message
#[derive(Debug, Clone)]
pub struct Banner {
    slot: Option<Message>,
    success_ttl: Duration,
}

impl Banner {
    pub const DEFAULT_SUCCESS_TTL: Duration = Duration::from_millis(3000);

    pub fn new(success_ttl: Duration) -> Self {
        Self {
            slot: None,
            success_ttl,
        }
    }

    pub fn show(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.show_at(kind, text, Instant::now());
    }

    pub fn show_at(&mut self, kind: MessageKind, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::debug!(kind = kind.as_str(), "{text}");
        self.slot = Some(Message {
            kind,
            text,
            shown_at: now,
        });
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// The visible message, dropping an expired success message first
    pub fn current(&mut self) -> Option<&Message> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&mut self, now: Instant) -> Option<&Message> {
        let expired = self.slot.as_ref().is_some_and(|message| {
            message.kind.expires()
                && now.saturating_duration_since(message.shown_at) >= self.success_ttl
        });
        if expired {
            self.slot = None;
        }
        self.slot.as_ref()
    }

    /// The stored message without applying expiry
    pub fn peek(&self) -> Option<&Message> {
        self.slot.as_ref()
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUCCESS_TTL)
    }
}
