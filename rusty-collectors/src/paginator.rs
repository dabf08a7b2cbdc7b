//! Reaction-driven pagination over a flat list of pages.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::error;

use crate::binding::CollectorBinding;
use crate::collector::ResetTimer;
use crate::error::CollectorError;
use crate::hub::CollectorHub;
use crate::options::{PaginatorOptions, QuestionOptions};
use crate::page::PageContent;
use crate::question::{DispatchErrors, ReactionMap, start};
use crate::transport::BotMessage;

/// Move `index` by `delta` within `len` pages, clamping or wrapping at the ends.
pub fn step_index(index: usize, delta: isize, len: usize, wrap: bool) -> usize {
    let Ok(len) = isize::try_from(len) else {
        return index;
    };
    if len == 0 {
        return 0;
    }

    let target = isize::try_from(index)
        .unwrap_or(isize::MAX)
        .saturating_add(delta);
    let bounded = if wrap {
        target.rem_euclid(len)
    } else {
        target.clamp(0, len - 1)
    };

    usize::try_from(bounded).unwrap_or(0)
}

#[derive(Clone)]
struct Pager {
    message: Arc<dyn BotMessage>,
    pages: Arc<Vec<PageContent>>,
    index: Arc<AtomicUsize>,
    wrap: bool,
}

impl Pager {
    async fn turn(&self, delta: isize) {
        let current = self.index.load(Ordering::SeqCst);
        let next = step_index(current, delta, self.pages.len(), self.wrap);
        self.index.store(next, Ordering::SeqCst);

        let Some(page) = self.pages.get(next) else {
            return;
        };
        if let Err(source) = self.message.edit(page).await {
            error!(?source, page = next, "failed to render paginator page");
        }
    }
}

/// A running paginator.
#[derive(Debug, Clone)]
pub struct PaginatorSession {
    binding: CollectorBinding,
    index: Arc<AtomicUsize>,
    len: usize,
}

impl PaginatorSession {
    /// Zero-based index of the page currently shown.
    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn binding(&self) -> &CollectorBinding {
        &self.binding
    }

    pub fn stop(&self) {
        self.binding.stop();
    }

    pub fn reset_timer(&self, reset: ResetTimer) {
        self.binding.reset_timer(reset);
    }
}

/// Show the first page and let the user flip through the rest with reactions.
///
/// A failed reaction removal or page edit is logged and the session goes on.
pub async fn paginator(
    hub: &CollectorHub,
    options: PaginatorOptions,
) -> Result<PaginatorSession, CollectorError> {
    options.validate()?;
    let PaginatorOptions {
        message,
        user_id,
        pages,
        reactions,
        wrap,
        collector,
        delete_reaction,
        delete_all_on_end,
    } = options;

    let len = pages.len();
    if let Some(first) = pages.first() {
        message.edit(first).await?;
    }

    let pager = Pager {
        message: Arc::clone(&message),
        pages: Arc::new(pages),
        index: Arc::new(AtomicUsize::new(0)),
        wrap,
    };

    let map = reactions
        .into_iter()
        .fold(ReactionMap::new(), |map, (key, delta)| {
            let pager = pager.clone();
            map.on(key, move |_event| {
                let pager = pager.clone();
                async move {
                    pager.turn(delta).await;
                    Ok(())
                }
            })
        });

    let options = QuestionOptions::new(message, user_id, map)
        .collector(collector)
        .delete_reaction(delete_reaction)
        .delete_all_on_end(delete_all_on_end);
    let binding = start(hub, options, DispatchErrors::Contain).await?;

    Ok(PaginatorSession {
        binding,
        index: pager.index,
        len,
    })
}
