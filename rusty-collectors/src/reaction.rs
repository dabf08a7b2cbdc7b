//! Reaction keys and the gateway events collectors consume.

use std::{fmt, str::FromStr};

use twilight_model::{
    channel::{Message, message::EmojiReactionType},
    gateway::GatewayReaction,
    id::{
        Id,
        marker::{ChannelMarker, EmojiMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

/// Identifier of a reaction emoji.
///
/// Custom emoji are identified by their id only, so a renamed emoji still
/// matches. Unicode emoji are identified by the emoji itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReactionKey {
    Unicode(String),
    Custom(Id<EmojiMarker>),
}

impl ReactionKey {
    /// Build a unicode key.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::Unicode(name.into())
    }

    /// Build a custom-emoji key from its raw id.
    ///
    /// Returns `None` for a zero id.
    pub fn custom(id: u64) -> Option<Self> {
        Id::new_checked(id).map(Self::Custom)
    }

    /// Parse `123`, `name:123`, `<:name:123>` or `<a:name:123>` as a custom emoji.
    fn parse_custom(raw: &str) -> Option<Id<EmojiMarker>> {
        let inner = raw
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .map(|rest| rest.strip_prefix("a:").unwrap_or(rest))
            .map(|rest| rest.strip_prefix(':').unwrap_or(rest))
            .unwrap_or(raw);

        let id_part = inner.rsplit(':').next()?;
        if id_part.is_empty() || !id_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        id_part.parse::<u64>().ok().and_then(Id::new_checked)
    }
}

impl FromStr for ReactionKey {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Ok(match Self::parse_custom(trimmed) {
            Some(id) => Self::Custom(id),
            None => Self::Unicode(trimmed.to_owned()),
        })
    }
}

impl From<&str> for ReactionKey {
    fn from(raw: &str) -> Self {
        match raw.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ReactionKey {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Id<EmojiMarker>> for ReactionKey {
    fn from(id: Id<EmojiMarker>) -> Self {
        Self::Custom(id)
    }
}

impl From<&EmojiReactionType> for ReactionKey {
    fn from(emoji: &EmojiReactionType) -> Self {
        match emoji {
            EmojiReactionType::Custom { id, .. } => Self::Custom(*id),
            EmojiReactionType::Unicode { name } => Self::Unicode(name.clone()),
        }
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode(name) => f.write_str(name),
            Self::Custom(id) => write!(f, "{id}"),
        }
    }
}

/// A reaction added to (or removed from) a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub user_id: Id<UserMarker>,
    /// Only known for guild reactions, where the gateway sends the member.
    pub user_bot: bool,
    pub key: ReactionKey,
}

impl ReactionEvent {
    pub fn new(
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        user_id: Id<UserMarker>,
        key: impl Into<ReactionKey>,
    ) -> Self {
        Self {
            channel_id,
            message_id,
            guild_id: None,
            user_id,
            user_bot: false,
            key: key.into(),
        }
    }
}

impl From<&GatewayReaction> for ReactionEvent {
    fn from(reaction: &GatewayReaction) -> Self {
        Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            guild_id: reaction.guild_id,
            user_id: reaction.user_id,
            user_bot: reaction
                .member
                .as_ref()
                .is_some_and(|member| member.user.bot),
            key: ReactionKey::from(&reaction.emoji),
        }
    }
}

/// A message posted in a channel a message collector watches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub author_id: Id<UserMarker>,
    pub author_bot: bool,
    pub content: String,
}

impl From<&Message> for MessageEvent {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            author_id: message.author.id,
            author_bot: message.author.bot,
            content: message.content.clone(),
        }
    }
}
