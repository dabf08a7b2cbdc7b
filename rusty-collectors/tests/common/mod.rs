#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use rusty_collectors::{BotMessage, CollectorHub, MessageEvent, PageContent, ReactionEvent, ReactionKey};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker, UserMarker},
};

pub const CHANNEL_ID: u64 = 1;
pub const MESSAGE_ID: u64 = 100;
pub const USER_ID: u64 = 10;
pub const OTHER_USER_ID: u64 = 11;

/// Everything a session did to the message.
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub reactions: Vec<ReactionKey>,
    pub edits: Vec<PageContent>,
    pub removed: Vec<(ReactionKey, Id<UserMarker>)>,
    pub deleted: Vec<Id<MessageMarker>>,
    pub clears: usize,
}

/// In-memory [`BotMessage`] that applies reaction changes like Discord does.
///
/// Each mutation can be switched to fail, the way a missing permission makes
/// the HTTP call return 403.
pub struct RecordingMessage {
    state: Mutex<Recorded>,
    fail_react: AtomicBool,
    fail_remove: AtomicBool,
    fail_clear: AtomicBool,
}

fn refuse(flag: &AtomicBool, action: &str) -> anyhow::Result<()> {
    if flag.load(Ordering::SeqCst) {
        anyhow::bail!("403 Forbidden: missing permissions to {action}");
    }
    Ok(())
}

impl RecordingMessage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(Recorded::default()),
            fail_react: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
        })
    }

    pub fn fail_reactions(&self) {
        self.fail_react.store(true, Ordering::SeqCst);
    }

    pub fn fail_removals(&self) {
        self.fail_remove.store(true, Ordering::SeqCst);
    }

    pub fn fail_clears(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Recorded {
        self.state.lock().unwrap().clone()
    }

    pub fn reactions(&self) -> Vec<String> {
        self.snapshot()
            .reactions
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn last_edit(&self) -> Option<PageContent> {
        self.snapshot().edits.last().cloned()
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.snapshot()
            .removed
            .iter()
            .map(|(key, _)| key.to_string())
            .collect()
    }
}

#[async_trait]
impl BotMessage for RecordingMessage {
    fn id(&self) -> Id<MessageMarker> {
        Id::new(MESSAGE_ID)
    }

    fn channel_id(&self) -> Id<ChannelMarker> {
        Id::new(CHANNEL_ID)
    }

    async fn edit(&self, page: &PageContent) -> anyhow::Result<()> {
        self.state.lock().unwrap().edits.push(page.clone());
        Ok(())
    }

    async fn react(&self, key: &ReactionKey) -> anyhow::Result<()> {
        refuse(&self.fail_react, "add reactions")?;
        let mut state = self.state.lock().unwrap();
        if !state.reactions.contains(key) {
            state.reactions.push(key.clone());
        }
        Ok(())
    }

    async fn clear_reactions(&self) -> anyhow::Result<()> {
        refuse(&self.fail_clear, "clear reactions")?;
        let mut state = self.state.lock().unwrap();
        state.reactions.clear();
        state.clears += 1;
        Ok(())
    }

    async fn remove_reaction(&self, key: &ReactionKey, user_id: Id<UserMarker>) -> anyhow::Result<()> {
        refuse(&self.fail_remove, "remove reactions")?;
        self.state
            .lock()
            .unwrap()
            .removed
            .push((key.clone(), user_id));
        Ok(())
    }

    async fn delete_message(&self, message_id: Id<MessageMarker>) -> anyhow::Result<()> {
        self.state.lock().unwrap().deleted.push(message_id);
        Ok(())
    }
}

pub fn as_bot_message(message: &Arc<RecordingMessage>) -> Arc<dyn BotMessage> {
    Arc::clone(message) as Arc<dyn BotMessage>
}

pub fn user() -> Id<UserMarker> {
    Id::new(USER_ID)
}

pub fn reaction_from(user: u64, key: &str) -> ReactionEvent {
    ReactionEvent::new(Id::new(CHANNEL_ID), Id::new(MESSAGE_ID), Id::new(user), key)
}

/// Simulate the authorized user pressing `key` and let the session react.
pub async fn press(hub: &CollectorHub, key: &str) {
    hub.dispatch_reaction(&reaction_from(USER_ID, key));
    settle().await;
}

/// Simulate the authorized user typing `content` in the channel.
pub async fn say(hub: &CollectorHub, id: u64, content: &str) {
    hub.dispatch_message(&MessageEvent {
        id: Id::new(id),
        channel_id: Id::new(CHANNEL_ID),
        author_id: Id::new(USER_ID),
        author_bot: false,
        content: content.to_owned(),
    });
    settle().await;
}

/// Give spawned session tasks the chance to run to their next await point.
pub async fn settle() {
    for _ in 0..100 {
        tokio::task::yield_now().await;
    }
}
