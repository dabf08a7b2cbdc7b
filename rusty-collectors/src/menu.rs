//! Reaction menus: navigation over a page tree driven by one user's reactions.

use std::sync::Arc;

use tracing::{debug, error, warn};
use twilight_model::id::{Id, marker::UserMarker};

use crate::binding::CollectorBinding;
use crate::collector::Collector;
use crate::controller::{MenuController, react_all};
use crate::error::CollectorError;
use crate::filter::{MessageFilter, ReactionFilter};
use crate::hub::CollectorHub;
use crate::options::MenuOptions;
use crate::page::Page;
use crate::reaction::{MessageEvent, ReactionEvent, ReactionKey};

/// Start a menu session on the bot message and return its controller.
///
/// Every key reachable anywhere in the tree is collected, so a sub-page's
/// trigger is recognized before that page is current. When any page listens
/// for messages, a message collector for the same user runs alongside and is
/// stopped together with the reaction collector. If the root reactions cannot
/// be added, both collectors are stopped before the error is returned.
pub async fn menu(
    hub: &CollectorHub,
    options: MenuOptions,
) -> Result<MenuController, CollectorError> {
    options.validate()?;
    let MenuOptions {
        message,
        user_id,
        pages,
        collector: collector_options,
        delete_messages,
    } = options;

    let filter = ReactionFilter::new(user_id, pages.reaction_keys());
    let reactions = hub.reaction_collector(
        message.id(),
        move |event| filter.matches(event),
        collector_options,
    );

    let messages = pages.has_message_handlers().then(|| {
        let filter = MessageFilter::new(user_id);
        hub.message_collector(
            message.channel_id(),
            move |received| filter.matches(received),
            collector_options,
        )
    });

    let binding = CollectorBinding::new(
        reactions.handle(),
        messages.as_ref().map(Collector::handle),
    );
    let controller = MenuController::new(Arc::clone(&message), binding, pages);

    tokio::spawn(run_reactions(controller.clone(), reactions, user_id));
    if let Some(messages) = messages {
        tokio::spawn(run_messages(controller.clone(), messages, delete_messages));
    }

    let root_keys: Vec<ReactionKey> = controller.pages().keys().cloned().collect();
    if let Err(source) = react_all(message.as_ref(), &root_keys).await {
        controller.stop();
        return Err(source);
    }

    Ok(controller)
}

async fn run_reactions(
    controller: MenuController,
    mut collector: Collector<ReactionEvent>,
    user_id: Id<UserMarker>,
) {
    let message_id = controller.message().id().get();

    while let Some(event) = collector.next().await {
        if let Err(source) = handle_reaction(&controller, event, user_id).await {
            error!(?source, message_id, "menu reaction handling failed");
        }
    }
    debug!(reason = ?collector.end_reason(), message_id, "menu collector ended");
    drop(collector);

    if let Err(source) = controller.message().clear_reactions().await {
        warn!(?source, message_id, "failed to clear menu reactions on end");
    }
    controller.binding().stop_messages();
}

async fn handle_reaction(
    controller: &MenuController,
    event: ReactionEvent,
    user_id: Id<UserMarker>,
) -> Result<(), CollectorError> {
    let message = controller.message();
    let current = controller.current_page();

    if let Some(page) = &current
        && page.back_emoji() == Some(&event.key)
        && controller.can_back()
    {
        return controller.back().await;
    }

    let next = match &current {
        Some(page) if !page.children().is_empty() => page.children().get(&event.key).cloned(),
        _ => controller.pages().get(&event.key).cloned(),
    };

    match next {
        Some(next) => {
            controller.enter(Arc::clone(&next));
            run_react_handler(controller, &next, event.clone()).await;

            match controller.current_page() {
                Some(page) if page.clears_reactions() => message.clear_reactions().await?,
                Some(page) if !page.reactions().is_empty() => {
                    message.clear_reactions().await?;
                    react_all(message.as_ref(), page.reactions()).await?;
                }
                _ => message.remove_reaction(&event.key, user_id).await?,
            }
        }
        None => message.remove_reaction(&event.key, user_id).await?,
    }

    controller.update(true).await
}

async fn run_react_handler(controller: &MenuController, page: &Page, event: ReactionEvent) {
    let Some(handler) = page.react_handler() else {
        return;
    };
    if let Err(source) = handler(controller.clone(), event).await {
        error!(?source, page = ?page.id(), "page reaction handler failed");
    }
}

async fn run_messages(
    controller: MenuController,
    mut collector: Collector<MessageEvent>,
    delete_messages: bool,
) {
    while let Some(received) = collector.next().await {
        if delete_messages
            && let Err(source) = controller.message().delete_message(received.id).await
        {
            warn!(?source, message_id = received.id.get(), "failed to delete collected message");
        }

        let Some(page) = controller.current_page() else {
            continue;
        };
        let Some(handler) = page.message_handler() else {
            continue;
        };
        if let Err(source) = handler(controller.clone(), received).await {
            error!(?source, page = ?page.id(), "page message handler failed");
        }
    }
    debug!(reason = ?collector.end_reason(), "menu message collector ended");
}
