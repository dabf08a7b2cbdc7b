//! Error taxonomy for collector sessions.

use thiserror::Error;

use crate::reaction::ReactionKey;

/// Everything an entry point or a navigation call can fail with.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("invalid collector options: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid action: {0}")]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Options rejected before any collector is registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pages is empty")]
    EmptyPages,

    #[error("no reactions were configured")]
    EmptyReactions,

    #[error("a yes/no question needs exactly 2 distinct reactions, got {0}")]
    YesNoReactionCount(usize),

    #[error("reaction {0} is configured more than once")]
    DuplicateReaction(ReactionKey),

    #[error("page id {0:?} is used by more than one page")]
    DuplicatePageId(String),
}

/// Caller misuse of the menu controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("couldn't go to page {0:?}, this page doesn't exist")]
    PageNotFound(String),

    #[error("cannot go back without a previous page")]
    NoHistory,
}
