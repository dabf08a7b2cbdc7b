//! One lifetime for the reaction collector and its optional message collector.

use crate::collector::{CollectorHandle, ResetTimer};

/// Handles to the collectors of one session.
///
/// Stopping or resetting the binding always reaches both halves, so a message
/// collector never outlives the reaction collector it was paired with.
#[derive(Debug, Clone)]
pub struct CollectorBinding {
    reactions: CollectorHandle,
    messages: Option<CollectorHandle>,
}

impl CollectorBinding {
    pub fn new(reactions: CollectorHandle, messages: Option<CollectorHandle>) -> Self {
        Self {
            reactions,
            messages,
        }
    }

    pub fn stop(&self) {
        if let Some(messages) = &self.messages {
            messages.stop();
        }
        self.reactions.stop();
    }

    pub fn reset_timer(&self, reset: ResetTimer) {
        if let Some(messages) = &self.messages {
            messages.reset_timer(reset);
        }
        self.reactions.reset_timer(reset);
    }

    pub(crate) fn stop_messages(&self) {
        if let Some(messages) = &self.messages {
            messages.stop();
        }
    }

    pub fn has_message_collector(&self) -> bool {
        self.messages.is_some()
    }

    /// Whether every collector of the session has ended.
    pub fn is_finished(&self) -> bool {
        self.reactions.is_closed()
            && self
                .messages
                .as_ref()
                .is_none_or(CollectorHandle::is_closed)
    }
}
