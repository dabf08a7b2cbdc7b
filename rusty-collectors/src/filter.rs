//! Event predicates deciding which reactions and messages a session collects.

use std::{collections::HashSet, sync::Arc};

use twilight_model::id::{Id, marker::UserMarker};

use crate::reaction::{MessageEvent, ReactionEvent, ReactionKey};

/// Accepts recognized reactions from the authorized, non-bot user.
#[derive(Debug, Clone)]
pub struct ReactionFilter {
    user_id: Id<UserMarker>,
    keys: Arc<HashSet<ReactionKey>>,
}

impl ReactionFilter {
    pub fn new(user_id: Id<UserMarker>, keys: impl IntoIterator<Item = ReactionKey>) -> Self {
        Self {
            user_id,
            keys: Arc::new(keys.into_iter().collect()),
        }
    }

    pub fn matches(&self, event: &ReactionEvent) -> bool {
        event.user_id == self.user_id && !event.user_bot && self.keys.contains(&event.key)
    }
}

/// Accepts messages written by the authorized, non-bot user.
#[derive(Debug, Clone, Copy)]
pub struct MessageFilter {
    user_id: Id<UserMarker>,
}

impl MessageFilter {
    pub fn new(user_id: Id<UserMarker>) -> Self {
        Self { user_id }
    }

    pub fn matches(&self, message: &MessageEvent) -> bool {
        message.author_id == self.user_id && !message.author_bot
    }
}
