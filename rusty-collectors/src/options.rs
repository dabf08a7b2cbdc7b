//! Typed, validated options for each entry point.
//!
//! The bot message and the authorized user are required constructor
//! arguments; everything else has a per-flow default and a builder method.

use std::{collections::HashSet, sync::Arc, time::Duration};

use twilight_model::id::{Id, marker::UserMarker};

use crate::collector::CollectorOptions;
use crate::error::ValidationError;
use crate::page::{PageContent, PageTree};
use crate::question::ReactionMap;
use crate::reaction::ReactionKey;
use crate::transport::BotMessage;

/// Default total duration of a session.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

fn default_collector() -> CollectorOptions {
    CollectorOptions::default().time(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

fn ensure_distinct<'a>(
    keys: impl IntoIterator<Item = &'a ReactionKey>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(ValidationError::DuplicateReaction(key.clone()));
        }
    }
    Ok(())
}

/// Options for [`menu`](crate::menu::menu).
#[derive(Clone)]
pub struct MenuOptions {
    pub(crate) message: Arc<dyn BotMessage>,
    pub(crate) user_id: Id<UserMarker>,
    pub(crate) pages: PageTree,
    pub(crate) collector: CollectorOptions,
    pub(crate) delete_messages: bool,
}

impl MenuOptions {
    pub fn new(message: Arc<dyn BotMessage>, user_id: Id<UserMarker>, pages: PageTree) -> Self {
        Self {
            message,
            user_id,
            pages,
            collector: default_collector(),
            delete_messages: true,
        }
    }

    pub fn collector(mut self, collector: CollectorOptions) -> Self {
        self.collector = collector;
        self
    }

    /// Delete the user's messages once a page's message handler saw them.
    pub fn delete_messages(mut self, delete: bool) -> Self {
        self.delete_messages = delete;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.pages.is_empty() {
            return Err(ValidationError::EmptyPages);
        }
        self.pages.validate()
    }
}

/// Options for [`paginator`](crate::paginator::paginator).
#[derive(Clone)]
pub struct PaginatorOptions {
    pub(crate) message: Arc<dyn BotMessage>,
    pub(crate) user_id: Id<UserMarker>,
    pub(crate) pages: Vec<PageContent>,
    pub(crate) reactions: Vec<(ReactionKey, isize)>,
    pub(crate) wrap: bool,
    pub(crate) collector: CollectorOptions,
    pub(crate) delete_reaction: bool,
    pub(crate) delete_all_on_end: bool,
}

impl PaginatorOptions {
    pub fn new(
        message: Arc<dyn BotMessage>,
        user_id: Id<UserMarker>,
        pages: Vec<PageContent>,
    ) -> Self {
        Self {
            message,
            user_id,
            pages,
            reactions: vec![(ReactionKey::from("◀️"), -1), (ReactionKey::from("▶️"), 1)],
            wrap: false,
            collector: default_collector(),
            delete_reaction: true,
            delete_all_on_end: true,
        }
    }

    /// Replace the navigation reactions with `(key, index delta)` pairs.
    pub fn reactions<I, K>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = (K, isize)>,
        K: Into<ReactionKey>,
    {
        self.reactions = reactions
            .into_iter()
            .map(|(key, delta)| (key.into(), delta))
            .collect();
        self
    }

    /// Wrap around at either end instead of clamping.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn collector(mut self, collector: CollectorOptions) -> Self {
        self.collector = collector;
        self
    }

    pub fn delete_reaction(mut self, delete: bool) -> Self {
        self.delete_reaction = delete;
        self
    }

    pub fn delete_all_on_end(mut self, delete: bool) -> Self {
        self.delete_all_on_end = delete;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.pages.is_empty() {
            return Err(ValidationError::EmptyPages);
        }
        if self.reactions.is_empty() {
            return Err(ValidationError::EmptyReactions);
        }
        ensure_distinct(self.reactions.iter().map(|(key, _)| key))
    }
}

/// Options for [`question`](crate::question::question).
#[derive(Clone)]
pub struct QuestionOptions {
    pub(crate) message: Arc<dyn BotMessage>,
    pub(crate) user_id: Id<UserMarker>,
    pub(crate) reactions: ReactionMap,
    pub(crate) collector: CollectorOptions,
    pub(crate) delete_reaction: bool,
    pub(crate) delete_all_on_end: bool,
}

impl QuestionOptions {
    pub fn new(
        message: Arc<dyn BotMessage>,
        user_id: Id<UserMarker>,
        reactions: ReactionMap,
    ) -> Self {
        Self {
            message,
            user_id,
            reactions,
            collector: default_collector(),
            delete_reaction: false,
            delete_all_on_end: false,
        }
    }

    pub fn collector(mut self, collector: CollectorOptions) -> Self {
        self.collector = collector;
        self
    }

    /// Remove the user's reaction after each press.
    pub fn delete_reaction(mut self, delete: bool) -> Self {
        self.delete_reaction = delete;
        self
    }

    /// Remove every reaction once the collector ends.
    pub fn delete_all_on_end(mut self, delete: bool) -> Self {
        self.delete_all_on_end = delete;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.reactions.is_empty() {
            return Err(ValidationError::EmptyReactions);
        }
        Ok(())
    }
}

/// Options for [`yes_no_question`](crate::yes_no::yes_no_question).
#[derive(Clone)]
pub struct YesNoOptions {
    pub(crate) message: Arc<dyn BotMessage>,
    pub(crate) user_id: Id<UserMarker>,
    pub(crate) reactions: Vec<ReactionKey>,
    pub(crate) collector: CollectorOptions,
    pub(crate) delete_reaction: bool,
    pub(crate) delete_all_on_end: bool,
}

impl YesNoOptions {
    pub fn new(message: Arc<dyn BotMessage>, user_id: Id<UserMarker>) -> Self {
        Self {
            message,
            user_id,
            reactions: vec![ReactionKey::from("✅"), ReactionKey::from("❌")],
            collector: default_collector(),
            delete_reaction: false,
            delete_all_on_end: true,
        }
    }

    /// The "yes" key first, then the "no" key.
    pub fn reactions<I, K>(mut self, reactions: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ReactionKey>,
    {
        self.reactions = reactions.into_iter().map(Into::into).collect();
        self
    }

    pub fn collector(mut self, collector: CollectorOptions) -> Self {
        self.collector = collector;
        self
    }

    pub fn delete_reaction(mut self, delete: bool) -> Self {
        self.delete_reaction = delete;
        self
    }

    pub fn delete_all_on_end(mut self, delete: bool) -> Self {
        self.delete_all_on_end = delete;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.reactions.len() != 2 {
            return Err(ValidationError::YesNoReactionCount(self.reactions.len()));
        }
        ensure_distinct(&self.reactions)
    }
}
