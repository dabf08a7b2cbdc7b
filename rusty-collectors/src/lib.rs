//! Reaction-driven interaction sessions for Discord bots.
//!
//! A session attaches to a message the bot already sent and listens for one
//! user's reactions (and optionally messages) through a [`CollectorHub`] that
//! the gateway loop feeds. Four entry points build on it:
//!
//! - [`menu`]: navigation over a [`PageTree`] with back/history support,
//!   controlled through a [`MenuController`].
//! - [`paginator`]: previous/next over a flat list of pages.
//! - [`question`]: arbitrary callbacks keyed by reaction.
//! - [`yes_no_question`]: a single awaited yes/no answer.

/// Paired collector lifetimes.
pub mod binding;
/// Bounded event collectors.
pub mod collector;
/// Menu navigation state machine.
pub mod controller;
/// Error taxonomy.
pub mod error;
/// Event predicates.
pub mod filter;
/// Gateway event fan-out.
pub mod hub;
/// Page-tree menus.
pub mod menu;
/// Entry point options.
pub mod options;
/// Page model.
pub mod page;
/// Flat reaction pagination.
pub mod paginator;
/// Generic reaction dispatch.
pub mod question;
/// Reaction keys and events.
pub mod reaction;
/// Message mutation primitives.
pub mod transport;
/// Awaited yes/no prompts.
pub mod yes_no;

pub use binding::CollectorBinding;
pub use collector::{Collector, CollectorHandle, CollectorOptions, EndReason, ResetTimer};
pub use controller::MenuController;
pub use error::{CollectorError, NavigationError, ValidationError};
pub use hub::CollectorHub;
pub use menu::menu;
pub use options::{
    DEFAULT_TIMEOUT_SECS, MenuOptions, PaginatorOptions, QuestionOptions, YesNoOptions,
};
pub use page::{Page, PageContent, PageTree};
pub use paginator::{PaginatorSession, paginator};
pub use question::{ReactionMap, question};
pub use reaction::{MessageEvent, ReactionEvent, ReactionKey};
pub use transport::{BotMessage, TwilightMessage};
pub use yes_no::yes_no_question;
