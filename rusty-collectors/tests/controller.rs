mod common;

use std::sync::Arc;

use common::{RecordingMessage, as_bot_message};
use rusty_collectors::{
    BotMessage, Collector, CollectorBinding, CollectorError, CollectorHub, CollectorOptions,
    MenuController, NavigationError, Page, PageTree, ReactionEvent,
};
use twilight_model::id::Id;

fn tree() -> PageTree {
    PageTree::new()
        .with("a", Page::new("zero").with_id("p0"))
        .with(
            "b",
            Page::new("one")
                .with_id("p1")
                .with_reactions(["x", "y"])
                .with_back_emoji("↩️"),
        )
        .with(
            "c",
            Page::new("two")
                .with_id("p2")
                .with_child("d", Page::new("nested").with_id("nested")),
        )
}

fn id_of(page: Option<Arc<Page>>) -> Option<String> {
    page.and_then(|page| page.id().map(str::to_owned))
}

fn controller(
    hub: &CollectorHub,
    message: &Arc<RecordingMessage>,
) -> (MenuController, Collector<ReactionEvent>) {
    let collector = hub.reaction_collector(Id::new(100), |_| true, CollectorOptions::default());
    let binding = CollectorBinding::new(collector.handle(), None);
    (
        MenuController::new(as_bot_message(message), binding, tree()),
        collector,
    )
}

#[tokio::test]
async fn history_is_a_single_slot() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);

    assert!(!controller.can_back());

    for id in ["p0", "p1", "p2"] {
        controller.go_to(id).await.unwrap();
        assert!(controller.can_back());
    }
    assert_eq!(id_of(controller.current_page()).as_deref(), Some("p2"));
    assert_eq!(id_of(controller.last_page()).as_deref(), Some("p1"));

    controller.back().await.unwrap();
    assert_eq!(id_of(controller.current_page()).as_deref(), Some("p1"));
    assert_eq!(id_of(controller.last_page()).as_deref(), Some("p2"));

    controller.back().await.unwrap();
    assert_eq!(id_of(controller.current_page()).as_deref(), Some("p2"));
    assert_eq!(id_of(controller.last_page()).as_deref(), Some("p1"));
}

#[tokio::test]
async fn go_to_reaches_nested_pages() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);

    controller.go_to("nested").await.unwrap();

    assert_eq!(id_of(controller.current_page()).as_deref(), Some("nested"));
    assert_eq!(message.last_edit(), Some("nested".into()));
}

#[tokio::test]
async fn go_to_unknown_page_leaves_state_untouched() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);
    controller.go_to("p0").await.unwrap();
    let edits_before = message.snapshot().edits.len();

    let err = controller.go_to("missing").await.unwrap_err();

    assert!(matches!(
        err,
        CollectorError::Navigation(NavigationError::PageNotFound(ref id)) if id == "missing"
    ));
    assert_eq!(id_of(controller.current_page()).as_deref(), Some("p0"));
    assert!(controller.can_back());
    assert_eq!(message.snapshot().edits.len(), edits_before);
}

#[tokio::test]
async fn back_without_history_fails() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);

    let err = controller.back().await.unwrap_err();

    assert!(matches!(
        err,
        CollectorError::Navigation(NavigationError::NoHistory)
    ));
    assert!(controller.current_page().is_none());
    assert!(!controller.can_back());
    assert!(message.snapshot().edits.is_empty());
}

#[tokio::test]
async fn back_to_the_root_restores_root_reactions_and_clears_history() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);

    controller.go_to("p1").await.unwrap();
    controller.back().await.unwrap();

    assert!(controller.current_page().is_none());
    assert!(!controller.can_back());
    assert_eq!(message.reactions(), ["a", "b", "c"]);
}

#[tokio::test]
async fn full_update_replaces_every_reaction() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);
    as_bot_message(&message).react(&"junk".into()).await.unwrap();

    controller.go_to("p1").await.unwrap();
    assert_eq!(message.reactions(), ["x", "y", "↩️"]);

    controller.update(false).await.unwrap();
    assert_eq!(message.reactions(), ["x", "y", "↩️"]);
    assert_eq!(message.last_edit(), Some("one".into()));
}

#[tokio::test]
async fn content_only_update_keeps_reactions() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);
    controller.go_to("p1").await.unwrap();
    let clears = message.snapshot().clears;

    controller.update(true).await.unwrap();

    assert_eq!(message.snapshot().clears, clears);
    assert_eq!(message.reactions(), ["x", "y", "↩️"]);
}

#[tokio::test]
async fn stop_ends_the_collector() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, mut collector) = controller(&hub, &message);

    controller.stop();

    assert!(collector.next().await.is_none());
}

#[tokio::test]
async fn go_to_keeps_the_new_page_when_rendering_fails() {
    let hub = CollectorHub::new();
    let message = RecordingMessage::new();
    let (controller, _collector) = controller(&hub, &message);
    message.fail_reactions();

    let err = controller.go_to("p1").await.unwrap_err();

    assert!(matches!(err, CollectorError::Transport(_)));
    assert_eq!(id_of(controller.current_page()).as_deref(), Some("p1"));
    assert!(controller.can_back());
}
