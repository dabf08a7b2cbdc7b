//! Time- and count-bounded event collectors.
//!
//! A [`Collector`] is the receiving half of a subscription registered with the
//! [`CollectorHub`](crate::hub::CollectorHub). It yields filtered events from
//! [`Collector::next`] until one of its limits ends it. A cloneable
//! [`CollectorHandle`] lets other tasks stop it or extend its timers.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tracing::debug;

/// Limits applied to a collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorOptions {
    /// End after this many items were collected.
    pub max: Option<usize>,
    /// End when nothing was collected for this long.
    pub idle: Option<Duration>,
    /// End this long after the collector started.
    pub time: Option<Duration>,
    /// Un-count a collected item when a matching removal arrives.
    pub dispose: bool,
}

impl CollectorOptions {
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn idle(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }

    pub fn time(mut self, time: Duration) -> Self {
        self.time = Some(time);
        self
    }

    pub fn dispose(mut self, dispose: bool) -> Self {
        self.dispose = dispose;
        self
    }
}

/// New timer values for [`CollectorHandle::reset_timer`].
///
/// A `None` field restarts that timer with its current duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetTimer {
    pub time: Option<Duration>,
    pub idle: Option<Duration>,
}

/// Why a collector stopped yielding events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Stopped through a handle.
    User,
    /// Total duration elapsed.
    Time,
    /// Idle duration elapsed without a collected item.
    Idle,
    /// `max` items collected.
    Limit,
    /// The watched message was deleted.
    MessageDelete,
    /// The hub feeding the collector went away.
    Closed,
}

pub(crate) enum Delivery<T> {
    Collect(T),
    Dispose,
}

#[derive(Debug)]
enum Control {
    End(EndReason),
    Reset(ResetTimer),
}

/// Cloneable remote control for a running collector.
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    control: mpsc::UnboundedSender<Control>,
}

impl CollectorHandle {
    /// End the collector. Stopping an ended collector does nothing.
    pub fn stop(&self) {
        self.end(EndReason::User);
    }

    /// Restart the total and idle timers.
    pub fn reset_timer(&self, reset: ResetTimer) {
        let _ = self.control.send(Control::Reset(reset));
    }

    /// Whether the collector already ended and was dropped.
    pub fn is_closed(&self) -> bool {
        self.control.is_closed()
    }

    pub(crate) fn end(&self, reason: EndReason) {
        let _ = self.control.send(Control::End(reason));
    }
}

/// Receiving half of a subscription.
pub struct Collector<T> {
    deliveries: mpsc::UnboundedReceiver<Delivery<T>>,
    control: mpsc::UnboundedReceiver<Control>,
    handle: CollectorHandle,
    options: CollectorOptions,
    time_deadline: Option<Instant>,
    last_activity: Instant,
    collected: usize,
    ended: Option<EndReason>,
}

impl<T> Collector<T> {
    pub(crate) fn new(
        options: CollectorOptions,
    ) -> (Self, mpsc::UnboundedSender<Delivery<T>>) {
        let (delivery_tx, deliveries) = mpsc::unbounded_channel();
        let (control_tx, control) = mpsc::unbounded_channel();
        let now = Instant::now();

        let collector = Self {
            deliveries,
            control,
            handle: CollectorHandle {
                control: control_tx,
            },
            options,
            time_deadline: options.time.map(|time| now + time),
            last_activity: now,
            collected: 0,
            ended: None,
        };

        (collector, delivery_tx)
    }

    pub fn handle(&self) -> CollectorHandle {
        self.handle.clone()
    }

    /// Number of items collected and not disposed.
    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    /// Wait for the next collected item, or `None` once the collector ended.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if self.ended.is_some() {
                return None;
            }

            if let Some(max) = self.options.max
                && self.collected >= max
            {
                self.finish(EndReason::Limit);
                continue;
            }

            let idle_deadline = self.options.idle.map(|idle| self.last_activity + idle);

            tokio::select! {
                () = sleep_until_deadline(self.time_deadline) => self.finish(EndReason::Time),
                () = sleep_until_deadline(idle_deadline) => self.finish(EndReason::Idle),
                control = self.control.recv() => match control {
                    Some(Control::End(reason)) => self.finish(reason),
                    Some(Control::Reset(reset)) => self.reset(reset),
                    // The collector owns a sender, so the channel never closes first.
                    None => self.finish(EndReason::Closed),
                },
                delivery = self.deliveries.recv() => match delivery {
                    Some(Delivery::Collect(item)) => {
                        self.collected += 1;
                        self.last_activity = Instant::now();
                        return Some(item);
                    }
                    Some(Delivery::Dispose) => {
                        self.collected = self.collected.saturating_sub(1);
                    }
                    None => self.finish(EndReason::Closed),
                },
            }
        }
    }

    fn reset(&mut self, reset: ResetTimer) {
        let now = Instant::now();

        if let Some(time) = reset.time {
            self.options.time = Some(time);
        }
        if let Some(idle) = reset.idle {
            self.options.idle = Some(idle);
        }

        self.time_deadline = self.options.time.map(|time| now + time);
        self.last_activity = now;
    }

    fn finish(&mut self, reason: EndReason) {
        if self.ended.is_none() {
            debug!(?reason, collected = self.collected, "collector ended");
            self.ended = Some(reason);
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ends_after_max_items() {
        let (mut collector, tx) = Collector::new(CollectorOptions::default().max(2));
        for item in 1..=3 {
            let _ = tx.send(Delivery::Collect(item));
        }

        assert_eq!(collector.next().await, Some(1));
        assert_eq!(collector.next().await, Some(2));
        assert_eq!(collector.next().await, None);
        assert_eq!(collector.end_reason(), Some(EndReason::Limit));
    }

    #[tokio::test(start_paused = true)]
    async fn ends_when_total_time_elapses() {
        let (mut collector, _tx) =
            Collector::<u8>::new(CollectorOptions::default().time(Duration::from_secs(30)));
        let started = Instant::now();

        assert_eq!(collector.next().await, None);
        assert_eq!(collector.end_reason(), Some(EndReason::Time));
        assert!(started.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timer_restarts_on_every_item() {
        let (mut collector, tx) =
            Collector::new(CollectorOptions::default().idle(Duration::from_secs(10)));
        let started = Instant::now();

        let feeder = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(8)).await;
            let _ = tx.send(Delivery::Collect("late"));
            tokio::time::sleep(Duration::from_secs(60)).await;
            drop(tx);
        });

        assert_eq!(collector.next().await, Some("late"));
        assert_eq!(collector.next().await, None);
        assert_eq!(collector.end_reason(), Some(EndReason::Idle));
        assert!(started.elapsed() >= Duration::from_secs(18));
        feeder.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn reset_timer_extends_the_deadline() {
        let (mut collector, _tx) =
            Collector::<u8>::new(CollectorOptions::default().time(Duration::from_secs(10)));
        let handle = collector.handle();
        let started = Instant::now();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            handle.reset_timer(ResetTimer {
                time: Some(Duration::from_secs(20)),
                idle: None,
            });
        });

        assert_eq!(collector.next().await, None);
        assert_eq!(collector.end_reason(), Some(EndReason::Time));
        assert!(started.elapsed() >= Duration::from_secs(25));
    }

    #[tokio::test]
    async fn stop_ends_immediately() {
        let (mut collector, _tx) = Collector::<u8>::new(CollectorOptions::default());
        collector.handle().stop();

        assert_eq!(collector.next().await, None);
        assert_eq!(collector.end_reason(), Some(EndReason::User));
    }

    #[tokio::test]
    async fn dispose_uncounts_a_collected_item() {
        let (mut collector, tx) = Collector::new(CollectorOptions::default().max(2).dispose(true));
        let _ = tx.send(Delivery::Collect(1));
        let _ = tx.send(Delivery::Dispose);
        for item in 2..=4 {
            let _ = tx.send(Delivery::Collect(item));
        }

        assert_eq!(collector.next().await, Some(1));
        assert_eq!(collector.next().await, Some(2));
        assert_eq!(collector.next().await, Some(3));
        assert_eq!(collector.next().await, None);
        assert_eq!(collector.collected(), 2);
        assert_eq!(collector.end_reason(), Some(EndReason::Limit));
    }
}
