//! Moodreel library crate: the client-side core of an
//! emotion-driven movie recommender.
//!
//! The library wraps a remote HTTP/JSON movie API behind trait gateways,
//! holds the emotion catalogue for the picker page, and runs the movie
//! rating session: fetch a movie's detail, submit emotion ratings with
//! optimistic local count updates, and report the emotional match
//! fraction back to the embedder when the session closes.

pub mod api;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod session;
pub mod view;

pub use api::{
    ClientError, Emotion, EmotionCount, EmotionGateway, HttpApiGateway, MovieDetail, MovieGateway,
};
pub use catalog::{CatalogEntry, CatalogView, EmotionCatalog, NoopPageChrome, PageChrome};
pub use config::MoodreelConfig;
pub use notify::{Notifier, NoopNotifier, StderrNotifier};
pub use session::{
    DETAIL_CLEAR_DELAY, EmotionPercentage, MatchFraction, MovieRatingSession, OpenTicket,
    RatingCallback, RatingSessionState,
};
pub use view::DetailView;
