//! Page tree model: content units, their reaction triggers and nested children.

use std::{collections::HashSet, fmt, future::Future, sync::Arc};

use futures::{FutureExt as _, future::BoxFuture};
use twilight_model::channel::message::embed::Embed;

use crate::controller::MenuController;
use crate::error::ValidationError;
use crate::reaction::{MessageEvent, ReactionKey, ReactionEvent};

/// Future returned by page callbacks.
pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;
/// Callback run after a reaction navigated to a page.
pub type ReactHandler = Arc<dyn Fn(MenuController, ReactionEvent) -> HandlerFuture + Send + Sync>;
/// Callback run for each message the user sends while a page is current.
pub type MessageHandler = Arc<dyn Fn(MenuController, MessageEvent) -> HandlerFuture + Send + Sync>;

/// What a page renders into the bot message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

impl PageContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

impl From<Embed> for PageContent {
    fn from(embed: Embed) -> Self {
        Self::embed(embed)
    }
}

impl From<&str> for PageContent {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for PageContent {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

/// One navigable content unit of a menu.
#[derive(Clone, Default)]
pub struct Page {
    id: Option<String>,
    content: PageContent,
    reactions: Vec<ReactionKey>,
    back_emoji: Option<ReactionKey>,
    clear_reactions: bool,
    children: PageTree,
    on_react: Option<ReactHandler>,
    on_message: Option<MessageHandler>,
}

impl Page {
    pub fn new(content: impl Into<PageContent>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Give the page an id so [`MenuController::go_to`] can reach it.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Reactions shown while this page is current, in display order.
    pub fn with_reactions<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ReactionKey>,
    {
        self.reactions = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_back_emoji(mut self, key: impl Into<ReactionKey>) -> Self {
        self.back_emoji = Some(key.into());
        self
    }

    /// Remove every reaction when this page is entered instead of showing its own.
    pub fn clear_reactions(mut self, clear: bool) -> Self {
        self.clear_reactions = clear;
        self
    }

    /// Attach a child page reached by `key` while this page is current.
    pub fn with_child(mut self, key: impl Into<ReactionKey>, page: Page) -> Self {
        self.children.insert(key, page);
        self
    }

    pub fn on_react<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(MenuController, ReactionEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_react = Some(Arc::new(move |controller, event| {
            handler(controller, event).boxed()
        }));
        self
    }

    pub fn on_message<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(MenuController, MessageEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.on_message = Some(Arc::new(move |controller, message| {
            handler(controller, message).boxed()
        }));
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn reactions(&self) -> &[ReactionKey] {
        &self.reactions
    }

    pub fn back_emoji(&self) -> Option<&ReactionKey> {
        self.back_emoji.as_ref()
    }

    pub fn clears_reactions(&self) -> bool {
        self.clear_reactions
    }

    pub fn children(&self) -> &PageTree {
        &self.children
    }

    pub(crate) fn react_handler(&self) -> Option<&ReactHandler> {
        self.on_react.as_ref()
    }

    pub(crate) fn message_handler(&self) -> Option<&MessageHandler> {
        self.on_message.as_ref()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("reactions", &self.reactions)
            .field("back_emoji", &self.back_emoji)
            .field("clear_reactions", &self.clear_reactions)
            .field("children", &self.children.len())
            .field("on_react", &self.on_react.is_some())
            .field("on_message", &self.on_message.is_some())
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from reaction key to page.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    entries: Vec<(ReactionKey, Arc<Page>)>,
}

impl PageTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`PageTree::insert`].
    pub fn with(mut self, key: impl Into<ReactionKey>, page: Page) -> Self {
        self.insert(key, page);
        self
    }

    /// Insert a page, replacing any page already mapped to `key`.
    pub fn insert(&mut self, key: impl Into<ReactionKey>, page: Page) {
        let key = key.into();
        let page = Arc::new(page);
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = page,
            None => self.entries.push((key, page)),
        }
    }

    pub fn get(&self, key: &ReactionKey) -> Option<&Arc<Page>> {
        self.entries
            .iter()
            .find_map(|(existing, page)| (existing == key).then_some(page))
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

    /// Depth-first search for the first page carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Arc<Page>> {
        self.entries.iter().find_map(|(_, page)| {
            if page.id() == Some(id) {
                return Some(Arc::clone(page));
            }
            page.children.find_by_id(id)
        })
    }

    /// Every key that can trigger something anywhere in the tree.
    pub fn reaction_keys(&self) -> HashSet<ReactionKey> {
        let mut keys = HashSet::new();
        self.walk(&mut |key, page| {
            keys.insert(key.clone());
            keys.extend(page.reactions.iter().cloned());
            keys.extend(page.back_emoji.iter().cloned());
        });
        keys
    }

    /// Whether any page anywhere listens for user messages.
    pub fn has_message_handlers(&self) -> bool {
        let mut found = false;
        self.walk(&mut |_, page| found |= page.on_message.is_some());
        found
    }

    /// Reject duplicate page ids and duplicate reactions on a single page.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut ids = HashSet::new();
        let mut outcome = Ok(());

        self.walk(&mut |_, page| {
            if outcome.is_err() {
                return;
            }

            if let Some(id) = page.id()
                && !ids.insert(id.to_owned())
            {
                outcome = Err(ValidationError::DuplicatePageId(id.to_owned()));
                return;
            }

            let mut seen = HashSet::new();
            if let Some(duplicate) = page.reactions.iter().find(|key| !seen.insert(*key)) {
                outcome = Err(ValidationError::DuplicateReaction(duplicate.clone()));
            }
        });

        outcome
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ReactionKey, &'a Page)) {
        for (key, page) in &self.entries {
            visit(key, page);
            page.children.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> PageTree {
        PageTree::new()
            .with(
                "📖",
                Page::new("guide")
                    .with_id("guide")
                    .with_reactions(["1️⃣", "2️⃣"])
                    .with_back_emoji("↩️")
                    .with_child("1️⃣", Page::new("chapter one").with_id("chapter-1"))
                    .with_child(
                        "2️⃣",
                        Page::new("chapter two")
                            .with_id("chapter-2")
                            .with_child("🔎", Page::new("appendix").with_id("appendix")),
                    ),
            )
            .with("⚙️", Page::new("settings").with_id("settings"))
    }

    #[test]
    fn find_by_id_reaches_every_depth() {
        let tree = sample_tree();

        assert_eq!(
            tree.find_by_id("guide").as_deref().and_then(Page::id),
            Some("guide")
        );
        assert_eq!(
            tree.find_by_id("appendix").map(|p| p.content().clone()),
            Some(PageContent::text("appendix"))
        );
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn reaction_keys_flatten_the_whole_tree() {
        let keys = sample_tree().reaction_keys();

        for expected in ["📖", "⚙️", "1️⃣", "2️⃣", "↩️", "🔎"] {
            assert!(keys.contains(&ReactionKey::from(expected)), "missing {expected}");
        }
        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn insert_replaces_an_existing_key_in_place() {
        let tree = PageTree::new()
            .with("a", Page::new("first"))
            .with("b", Page::new("second"))
            .with("a", Page::new("replaced"));

        let keys: Vec<_> = tree.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(
            tree.get(&ReactionKey::from("a")).map(|p| p.content().clone()),
            Some(PageContent::text("replaced"))
        );
    }

    #[test]
    fn message_handlers_are_detected_in_nested_pages() {
        assert!(!sample_tree().has_message_handlers());

        let tree = PageTree::new().with(
            "a",
            Page::new("outer").with_child("b", Page::new("inner").on_message(|_, _| async { Ok(()) })),
        );
        assert!(tree.has_message_handlers());
    }

    #[test]
    fn validate_rejects_duplicate_ids_across_levels() {
        let tree = PageTree::new().with(
            "a",
            Page::new("outer")
                .with_id("same")
                .with_child("b", Page::new("inner").with_id("same")),
        );

        assert_eq!(
            tree.validate(),
            Err(ValidationError::DuplicatePageId("same".to_owned()))
        );
    }

    #[test]
    fn validate_rejects_duplicate_reactions_on_a_page() {
        let tree = PageTree::new().with("a", Page::new("page").with_reactions(["x", "y", "x"]));

        assert_eq!(
            tree.validate(),
            Err(ValidationError::DuplicateReaction(ReactionKey::from("x")))
        );
        assert_eq!(sample_tree().validate(), Ok(()));
    }
}
