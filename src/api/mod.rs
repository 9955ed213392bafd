//! Gateways for the remote movie API.
//!
//! This module provides trait-based gateways for communicating with the
//! emotion and movie endpoints. The trait-based design enables mocking in
//! tests while the HTTP implementation handles real requests.

mod error;
mod http;
mod models;

pub use error::ClientError;
pub use http::HttpApiGateway;
pub use models::{Emotion, EmotionCount, MovieDetail};

use async_trait::async_trait;

/// Gateway that can load the emotion collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmotionGateway: Send + Sync {
    /// Fetch all available emotions in server order.
    async fn emotions(&self) -> Result<Vec<Emotion>, ClientError>;
}

/// Gateway for movie detail reads and rating writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Fetch the full detail record for one movie.
    async fn movie_detail(&self, movie_id: u64) -> Result<MovieDetail, ClientError>;

    /// Submit one rating associating the movie with an emotion.
    ///
    /// The acknowledgement body is not used for state updates; only
    /// success or failure matters to callers.
    async fn submit_rating(&self, movie_id: u64, emotion_id: u64) -> Result<(), ClientError>;
}
