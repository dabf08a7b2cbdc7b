mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use common::{RecordingMessage, as_bot_message, press, settle, user};
use rusty_collectors::{
    CollectorError, CollectorHub, CollectorOptions, QuestionOptions, ReactionMap,
    ValidationError, question,
};

fn counting(count: &Arc<AtomicUsize>) -> ReactionMap {
    let apples = Arc::clone(count);
    ReactionMap::new()
        .on("🍎", move |_| {
            let apples = Arc::clone(&apples);
            async move {
                apples.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .key("🍐")
}

#[tokio::test]
async fn callbacks_run_for_their_reaction() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let count = Arc::new(AtomicUsize::new(0));

    question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count)),
    )
    .await
    .unwrap();
    assert_eq!(message.reactions(), ["🍎", "🍐"]);

    press(&hub, "🍎").await;
    press(&hub, "🍐").await;
    press(&hub, "🍎").await;

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(message.removed_keys().is_empty());
}

#[tokio::test]
async fn keys_without_callbacks_still_count_towards_the_limit() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let count = Arc::new(AtomicUsize::new(0));

    let binding = question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count))
            .collector(CollectorOptions::default().max(1)),
    )
    .await
    .unwrap();

    press(&hub, "🍐").await;
    press(&hub, "🍎").await;

    assert!(binding.is_finished());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn delete_reaction_removes_each_press() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let count = Arc::new(AtomicUsize::new(0));

    question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count))
            .delete_reaction(true),
    )
    .await
    .unwrap();

    press(&hub, "🍎").await;
    press(&hub, "🍐").await;

    assert_eq!(message.removed_keys(), ["🍎", "🍐"]);
}

#[tokio::test]
async fn delete_all_on_end_clears_after_stop() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let count = Arc::new(AtomicUsize::new(0));

    let binding = question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count))
            .delete_all_on_end(true),
    )
    .await
    .unwrap();

    binding.stop();
    settle().await;

    assert!(message.reactions().is_empty());
    assert_eq!(hub.active_reaction_collectors(), 0);
}

#[tokio::test]
async fn reactions_stay_after_stop_by_default() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let count = Arc::new(AtomicUsize::new(0));

    let binding = question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count)),
    )
    .await
    .unwrap();

    binding.stop();
    settle().await;

    assert_eq!(message.reactions(), ["🍎", "🍐"]);
}

#[tokio::test]
async fn a_failing_callback_ends_the_session() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let map = ReactionMap::new().on("💣", |_| async { anyhow::bail!("boom") });

    let binding = question(&hub, QuestionOptions::new(as_bot_message(&message), user(), map))
        .await
        .unwrap();
    assert!(!binding.is_finished());

    press(&hub, "💣").await;

    assert!(binding.is_finished());
    assert_eq!(hub.active_reaction_collectors(), 0);
}

#[tokio::test]
async fn empty_maps_are_rejected() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();

    let err = question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), ReactionMap::new()),
    )
    .await
    .err();

    assert!(matches!(
        err,
        Some(CollectorError::Validation(ValidationError::EmptyReactions))
    ));
    assert!(message.reactions().is_empty());
}

#[tokio::test]
async fn a_failed_reaction_removal_ends_the_session() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    message.fail_removals();
    let count = Arc::new(AtomicUsize::new(0));

    let binding = question(
        &hub,
        QuestionOptions::new(as_bot_message(&message), user(), counting(&count))
            .delete_reaction(true),
    )
    .await
    .unwrap();

    press(&hub, "🍎").await;

    assert!(binding.is_finished());
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
