//! Emotion catalogue: fetches the available emotions and shapes them for
//! the picker page.
//!
//! The catalogue is read-only. Picking an emotion is navigation owned by
//! the surrounding application, so each entry carries its navigation
//! target rather than any behaviour.

use crate::api::{Emotion, EmotionGateway};

/// Page title applied whenever the catalogue is presented.
pub const PAGE_TITLE: &str = "What the fuck should I watch tonight?!";

/// Heading shown above the emotion grid.
pub const CATALOG_HEADING: &str = "Show me movies that'll make me feel…";

/// Entry point for rating a movie without picking an emotion first.
pub const RATE_PROMPT: &str = "…or rate a movie?";

/// Side-effect boundary for page-level chrome such as the document title.
///
/// The core never mutates ambient page state; it asks this collaborator
/// instead.
pub trait PageChrome: Send + Sync {
    /// Sets the page title.
    fn set_title(&self, title: &str);
}

/// Chrome that ignores all updates, for embedders without a page.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPageChrome;

impl PageChrome for NoopPageChrome {
    fn set_title(&self, _title: &str) {}
}

/// One selectable emotion in the catalogue view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Stable emotion identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Navigation target for this emotion (`/{name}/`), resolved by the
    /// embedder's routing.
    pub nav_target: String,
}

/// Pure view of the catalogue's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    /// Heading shown above the entries.
    pub heading: &'static str,
    /// Selectable entries in server order.
    pub entries: Vec<CatalogEntry>,
    /// Prompt for rating a movie without picking an emotion.
    pub rate_prompt: &'static str,
}

/// Holds the fetched emotion collection and produces views of it.
pub struct EmotionCatalog<'client, Gateway, Chrome>
where
    Gateway: EmotionGateway,
    Chrome: PageChrome,
{
    gateway: &'client Gateway,
    chrome: &'client Chrome,
    emotions: Vec<Emotion>,
}

impl<'client, Gateway, Chrome> EmotionCatalog<'client, Gateway, Chrome>
where
    Gateway: EmotionGateway,
    Chrome: PageChrome,
{
    /// Creates an empty catalogue over the given collaborators.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, chrome: &'client Chrome) -> Self {
        Self {
            gateway,
            chrome,
            emotions: Vec::new(),
        }
    }

    /// Fetches the emotion collection, replacing the held one on success.
    ///
    /// On failure the previous collection is kept (empty when nothing was
    /// ever loaded) and a warning is logged; no user notification fires
    /// for this path and there is no retry.
    pub async fn load(&mut self) {
        match self.gateway.emotions().await {
            Ok(emotions) => self.emotions = emotions,
            Err(error) => {
                tracing::warn!("emotion catalogue load failed: {error}");
            }
        }
    }

    /// Currently held emotions in server order.
    #[must_use]
    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    /// Builds the catalogue view from current state.
    #[must_use]
    pub fn view(&self) -> CatalogView {
        CatalogView {
            heading: CATALOG_HEADING,
            entries: self
                .emotions
                .iter()
                .map(|emotion| CatalogEntry {
                    id: emotion.id,
                    name: emotion.name.clone(),
                    nav_target: format!("/{}/", emotion.name),
                })
                .collect(),
            rate_prompt: RATE_PROMPT,
        }
    }

    /// Applies page chrome and returns the view.
    #[must_use]
    pub fn present(&self) -> CatalogView {
        self.chrome.set_title(PAGE_TITLE);
        self.view()
    }
}
