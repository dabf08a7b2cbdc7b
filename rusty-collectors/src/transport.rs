//! Message mutation primitives a session needs from the chat platform.

use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::Message,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use crate::page::PageContent;
use crate::reaction::ReactionKey;

/// The bot message a session drives.
#[async_trait]
pub trait BotMessage: Send + Sync {
    fn id(&self) -> Id<MessageMarker>;

    fn channel_id(&self) -> Id<ChannelMarker>;

    /// Replace the rendered content with `page`.
    async fn edit(&self, page: &PageContent) -> anyhow::Result<()>;

    /// Add the bot's own reaction.
    async fn react(&self, key: &ReactionKey) -> anyhow::Result<()>;

    /// Remove every reaction from every user.
    async fn clear_reactions(&self) -> anyhow::Result<()>;

    /// Remove one user's reaction.
    async fn remove_reaction(&self, key: &ReactionKey, user_id: Id<UserMarker>)
    -> anyhow::Result<()>;

    /// Delete another message in the same channel, typically a user's reply.
    async fn delete_message(&self, message_id: Id<MessageMarker>) -> anyhow::Result<()>;
}

/// [`BotMessage`] backed by the Discord HTTP API.
#[derive(Clone)]
pub struct TwilightMessage {
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
}

impl TwilightMessage {
    pub fn new(
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Self {
        Self {
            http,
            channel_id,
            message_id,
        }
    }

    pub fn from_message(http: Arc<Client>, message: &Message) -> Self {
        Self::new(http, message.channel_id, message.id)
    }

    /// Post `page` in `channel_id` and wrap the created message.
    pub async fn send(
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        page: &PageContent,
    ) -> anyhow::Result<Self> {
        let mut request = http.create_message(channel_id).embeds(&page.embeds);
        if let Some(content) = page.content.as_deref() {
            request = request.content(content);
        }

        let created = request.await?.model().await?;
        Ok(Self::from_message(http, &created))
    }
}

fn request_reaction(key: &ReactionKey) -> RequestReactionType<'_> {
    match key {
        ReactionKey::Unicode(name) => RequestReactionType::Unicode { name },
        ReactionKey::Custom(id) => RequestReactionType::Custom { id: *id, name: None },
    }
}

#[async_trait]
impl BotMessage for TwilightMessage {
    fn id(&self) -> Id<MessageMarker> {
        self.message_id
    }

    fn channel_id(&self) -> Id<ChannelMarker> {
        self.channel_id
    }

    async fn edit(&self, page: &PageContent) -> anyhow::Result<()> {
        let mut request = self
            .http
            .update_message(self.channel_id, self.message_id)
            .embeds(Some(&page.embeds));
        if let Some(content) = page.content.as_deref() {
            request = request.content(Some(content));
        }

        request.await?;
        Ok(())
    }

    async fn react(&self, key: &ReactionKey) -> anyhow::Result<()> {
        self.http
            .create_reaction(self.channel_id, self.message_id, &request_reaction(key))
            .await?;
        Ok(())
    }

    async fn clear_reactions(&self) -> anyhow::Result<()> {
        self.http
            .delete_all_reactions(self.channel_id, self.message_id)
            .await?;
        Ok(())
    }

    async fn remove_reaction(
        &self,
        key: &ReactionKey,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        self.http
            .delete_reaction(self.channel_id, self.message_id, &request_reaction(key), user_id)
            .await?;
        Ok(())
    }

    async fn delete_message(&self, message_id: Id<MessageMarker>) -> anyhow::Result<()> {
        self.http.delete_message(self.channel_id, message_id).await?;
        Ok(())
    }
}
