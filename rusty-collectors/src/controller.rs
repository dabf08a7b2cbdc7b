//! Page navigation state machine for menu sessions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;

use crate::binding::CollectorBinding;
use crate::collector::ResetTimer;
use crate::error::{CollectorError, NavigationError};
use crate::page::{Page, PageTree};
use crate::reaction::ReactionKey;
use crate::transport::BotMessage;

/// Where a menu session is, or was one step ago.
#[derive(Debug, Clone)]
enum Location {
    Root,
    Page(Arc<Page>),
}

impl Location {
    fn from_current(current: Option<Arc<Page>>) -> Self {
        current.map_or(Self::Root, Self::Page)
    }

    fn into_current(self) -> Option<Arc<Page>> {
        match self {
            Self::Root => None,
            Self::Page(page) => Some(page),
        }
    }
}

/// `current == None` means the session is at the root mapping.
#[derive(Debug, Default)]
struct NavigationState {
    current: Option<Arc<Page>>,
    last: Option<Location>,
}

struct ControllerInner {
    message: Arc<dyn BotMessage>,
    binding: CollectorBinding,
    pages: PageTree,
    state: Mutex<NavigationState>,
}

/// Caller-facing handle over an active menu session.
///
/// History is a single slot: [`MenuController::back`] returns to the page that
/// was current immediately before the last transition, and swaps the two.
#[derive(Clone)]
pub struct MenuController {
    inner: Arc<ControllerInner>,
}

impl MenuController {
    pub fn new(message: Arc<dyn BotMessage>, binding: CollectorBinding, pages: PageTree) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                message,
                binding,
                pages,
                state: Mutex::new(NavigationState::default()),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, NavigationState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn message(&self) -> &Arc<dyn BotMessage> {
        &self.inner.message
    }

    pub fn pages(&self) -> &PageTree {
        &self.inner.pages
    }

    pub fn binding(&self) -> &CollectorBinding {
        &self.inner.binding
    }

    pub fn current_page(&self) -> Option<Arc<Page>> {
        self.state().current.clone()
    }

    /// The page before the last transition; `None` when that was the root.
    pub fn last_page(&self) -> Option<Arc<Page>> {
        match &self.state().last {
            Some(Location::Page(page)) => Some(Arc::clone(page)),
            Some(Location::Root) | None => None,
        }
    }

    pub fn can_back(&self) -> bool {
        self.state().last.is_some()
    }

    /// Make `page` current, pushing the previous location into history.
    pub(crate) fn enter(&self, page: Arc<Page>) {
        let mut state = self.state();
        let previous = state.current.replace(page);
        state.last = Some(Location::from_current(previous));
    }

    /// Jump to the page carrying `page_id` anywhere in the tree.
    ///
    /// The page becomes current before the message is re-rendered, so a
    /// transport error leaves the session on the new page with the message
    /// possibly half updated. Calling [`update`](Self::update) again resyncs it.
    pub async fn go_to(&self, page_id: &str) -> Result<(), CollectorError> {
        let page = self
            .inner
            .pages
            .find_by_id(page_id)
            .ok_or_else(|| NavigationError::PageNotFound(page_id.to_owned()))?;

        self.enter(page);
        self.update(false).await
    }

    /// Swap the current page with the previous one.
    ///
    /// Returning to the root empties history. As with [`go_to`](Self::go_to),
    /// the swap is kept when re-rendering fails.
    pub async fn back(&self) -> Result<(), CollectorError> {
        {
            let mut state = self.state();
            let target = state.last.take().ok_or(NavigationError::NoHistory)?;
            let previous = state.current.take();

            state.current = target.into_current();
            if state.current.is_some() {
                state.last = Some(Location::from_current(previous));
            }
        }

        self.update(false).await
    }

    /// Re-render the current page.
    ///
    /// Unless `only_content` is set, every reaction is removed and the page's
    /// reactions are added again, followed by its back emoji. At the root the
    /// content is left alone and the root keys are restored.
    pub async fn update(&self, only_content: bool) -> Result<(), CollectorError> {
        let message = &self.inner.message;
        let current = self.current_page();

        if only_content {
            if let Some(page) = &current {
                message.edit(page.content()).await?;
            }
            return Ok(());
        }

        message.clear_reactions().await?;
        match current {
            Some(page) => {
                message.edit(page.content()).await?;
                react_all(message.as_ref(), page.reactions()).await?;
                if let Some(back) = page.back_emoji() {
                    message.react(back).await?;
                }
            }
            None => {
                let keys: Vec<ReactionKey> = self.inner.pages.keys().cloned().collect();
                react_all(message.as_ref(), &keys).await?;
            }
        }

        Ok(())
    }

    /// Stop the reaction collector and its paired message collector.
    pub fn stop(&self) {
        self.inner.binding.stop();
    }

    pub fn reset_timer(&self, reset: ResetTimer) {
        self.inner.binding.reset_timer(reset);
    }
}

/// Add `keys` concurrently and wait for all of them.
pub(crate) async fn react_all(
    message: &dyn BotMessage,
    keys: &[ReactionKey],
) -> Result<(), CollectorError> {
    try_join_all(keys.iter().map(|key| message.react(key))).await?;
    Ok(())
}
