//! Generic reaction dispatcher: one callback per reaction key.

use std::{future::Future, sync::Arc};

use futures::FutureExt as _;
use tracing::{error, warn};
use twilight_model::id::{Id, marker::UserMarker};

use crate::binding::CollectorBinding;
use crate::collector::Collector;
use crate::controller::react_all;
use crate::error::CollectorError;
use crate::filter::ReactionFilter;
use crate::hub::CollectorHub;
use crate::options::QuestionOptions;
use crate::page::HandlerFuture;
use crate::reaction::{ReactionEvent, ReactionKey};
use crate::transport::BotMessage;

/// Callback run when its reaction is collected.
pub type ReactionCallback = Arc<dyn Fn(ReactionEvent) -> HandlerFuture + Send + Sync>;

/// Ordered reaction keys, each with an optional callback.
#[derive(Clone, Default)]
pub struct ReactionMap {
    entries: Vec<(ReactionKey, Option<ReactionCallback>)>,
}

impl ReactionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `key` to `callback`, replacing any previous mapping.
    pub fn on<F, Fut>(self, key: impl Into<ReactionKey>, callback: F) -> Self
    where
        F: Fn(ReactionEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let callback: ReactionCallback = Arc::new(move |event| callback(event).boxed());
        self.insert(key.into(), Some(callback))
    }

    /// Show and collect `key` without running anything for it.
    pub fn key(self, key: impl Into<ReactionKey>) -> Self {
        self.insert(key.into(), None)
    }

    fn insert(mut self, key: ReactionKey, callback: Option<ReactionCallback>) -> Self {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = callback,
            None => self.entries.push((key, callback)),
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &ReactionKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn callback(&self, key: &ReactionKey) -> Option<&ReactionCallback> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .and_then(|(_, callback)| callback.as_ref())
    }
}

struct Dispatcher {
    message: Arc<dyn BotMessage>,
    user_id: Id<UserMarker>,
    reactions: ReactionMap,
    delete_reaction: bool,
    delete_all_on_end: bool,
    errors: DispatchErrors,
}

/// What the dispatcher does when handling a press fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DispatchErrors {
    /// Log and end the session.
    End,
    /// Log and keep collecting. A failed reaction removal still runs the callback.
    Contain,
}

impl Dispatcher {
    async fn dispatch(&self, event: ReactionEvent) -> anyhow::Result<()> {
        if self.delete_reaction {
            let removed = self.message.remove_reaction(&event.key, self.user_id).await;
            match removed {
                Err(source) if self.errors == DispatchErrors::Contain => warn!(
                    ?source,
                    message_id = self.message.id().get(),
                    "failed to remove user reaction"
                ),
                removed => removed?,
            }
        }
        if let Some(callback) = self.reactions.callback(&event.key) {
            callback(event).await?;
        }
        Ok(())
    }

    async fn run(self, mut collector: Collector<ReactionEvent>) {
        let message_id = self.message.id().get();

        while let Some(event) = collector.next().await {
            let Err(source) = self.dispatch(event).await else {
                continue;
            };
            match self.errors {
                DispatchErrors::Contain => {
                    error!(?source, message_id, "reaction dispatch failed");
                }
                DispatchErrors::End => {
                    error!(?source, message_id, "reaction dispatch failed, ending collector");
                    break;
                }
            }
        }
        drop(collector);

        if self.delete_all_on_end
            && let Err(source) = self.message.clear_reactions().await
        {
            warn!(?source, message_id, "failed to clear reactions on end");
        }
    }
}

/// Add the mapped reactions and run their callbacks as the user presses them.
///
/// Errors raised while handling a press are not contained: they end the
/// session.
pub async fn question(
    hub: &CollectorHub,
    options: QuestionOptions,
) -> Result<CollectorBinding, CollectorError> {
    start(hub, options, DispatchErrors::End).await
}

pub(crate) async fn start(
    hub: &CollectorHub,
    options: QuestionOptions,
    errors: DispatchErrors,
) -> Result<CollectorBinding, CollectorError> {
    options.validate()?;
    let QuestionOptions {
        message,
        user_id,
        reactions,
        collector: collector_options,
        delete_reaction,
        delete_all_on_end,
    } = options;

    let keys: Vec<ReactionKey> = reactions.keys().cloned().collect();
    let filter = ReactionFilter::new(user_id, keys.iter().cloned());
    let collector = hub.reaction_collector(
        message.id(),
        move |event| filter.matches(event),
        collector_options,
    );
    let binding = CollectorBinding::new(collector.handle(), None);

    react_all(message.as_ref(), &keys).await?;

    let dispatcher = Dispatcher {
        message,
        user_id,
        reactions,
        delete_reaction,
        delete_all_on_end,
        errors,
    };
    tokio::spawn(dispatcher.run(collector));

    Ok(binding)
}
