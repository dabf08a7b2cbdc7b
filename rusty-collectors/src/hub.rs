//! Fan-out of gateway events to the collectors that are currently listening.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

use crate::collector::{Collector, CollectorHandle, CollectorOptions, Delivery, EndReason};
use crate::reaction::{MessageEvent, ReactionEvent};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

struct Sink<T> {
    message_id: Option<Id<MessageMarker>>,
    filter: Predicate<T>,
    dispose: bool,
    deliveries: mpsc::UnboundedSender<Delivery<T>>,
    handle: CollectorHandle,
}

struct Registry<T> {
    sinks: Mutex<Vec<Sink<T>>>,
}

impl<T: Clone> Registry<T> {
    fn new() -> Self {
        Self {
            sinks: Mutex::new(Vec::new()),
        }
    }

    fn sinks(&self) -> MutexGuard<'_, Vec<Sink<T>>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(
        &self,
        message_id: Option<Id<MessageMarker>>,
        filter: Predicate<T>,
        options: CollectorOptions,
    ) -> Collector<T> {
        let (collector, deliveries) = Collector::new(options);
        self.sinks().push(Sink {
            message_id,
            filter,
            dispose: options.dispose,
            deliveries,
            handle: collector.handle(),
        });
        collector
    }

    fn collect(&self, event: &T) {
        let mut sinks = self.sinks();
        sinks.retain(|sink| !sink.deliveries.is_closed());
        for sink in sinks.iter().filter(|sink| (sink.filter)(event)) {
            let _ = sink.deliveries.send(Delivery::Collect(event.clone()));
        }
    }

    fn dispose(&self, event: &T) {
        let mut sinks = self.sinks();
        sinks.retain(|sink| !sink.deliveries.is_closed());
        for sink in sinks
            .iter()
            .filter(|sink| sink.dispose && (sink.filter)(event))
        {
            let _ = sink.deliveries.send(Delivery::Dispose);
        }
    }

    fn end_for_message(&self, message_id: Id<MessageMarker>) {
        let mut sinks = self.sinks();
        sinks.retain(|sink| !sink.deliveries.is_closed());
        for sink in sinks
            .iter()
            .filter(|sink| sink.message_id == Some(message_id))
        {
            sink.handle.end(EndReason::MessageDelete);
        }
    }

    fn active(&self) -> usize {
        let mut sinks = self.sinks();
        sinks.retain(|sink| !sink.deliveries.is_closed());
        sinks.len()
    }
}

/// Shared registry of live collectors, fed by the gateway event loop.
pub struct CollectorHub {
    reactions: Registry<ReactionEvent>,
    messages: Registry<MessageEvent>,
}

impl Default for CollectorHub {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectorHub {
    pub fn new() -> Self {
        Self {
            reactions: Registry::new(),
            messages: Registry::new(),
        }
    }

    /// Collect reactions added to `message_id` that pass `filter`.
    pub fn reaction_collector<F>(
        &self,
        message_id: Id<MessageMarker>,
        filter: F,
        options: CollectorOptions,
    ) -> Collector<ReactionEvent>
    where
        F: Fn(&ReactionEvent) -> bool + Send + Sync + 'static,
    {
        let scoped =
            move |event: &ReactionEvent| event.message_id == message_id && filter(event);
        self.reactions
            .register(Some(message_id), Box::new(scoped), options)
    }

    /// Collect messages posted in `channel_id` that pass `filter`.
    pub fn message_collector<F>(
        &self,
        channel_id: Id<ChannelMarker>,
        filter: F,
        options: CollectorOptions,
    ) -> Collector<MessageEvent>
    where
        F: Fn(&MessageEvent) -> bool + Send + Sync + 'static,
    {
        let scoped =
            move |message: &MessageEvent| message.channel_id == channel_id && filter(message);
        self.messages.register(None, Box::new(scoped), options)
    }

    pub fn dispatch_reaction(&self, event: &ReactionEvent) {
        self.reactions.collect(event);
    }

    /// Forward a reaction removal to collectors created with `dispose`.
    pub fn dispatch_reaction_remove(&self, event: &ReactionEvent) {
        self.reactions.dispose(event);
    }

    pub fn dispatch_message(&self, message: &MessageEvent) {
        self.messages.collect(message);
    }

    /// End every reaction collector watching a deleted message.
    pub fn message_deleted(&self, message_id: Id<MessageMarker>) {
        self.reactions.end_for_message(message_id);
    }

    pub fn active_reaction_collectors(&self) -> usize {
        self.reactions.active()
    }

    pub fn active_message_collectors(&self) -> usize {
        self.messages.active()
    }
}
