//! HTTP implementation of the emotion and movie gateways.
//!
//! Wire records live here rather than in the domain model because the
//! server's field names (`emotion`, `poster_path`, camelCase review
//! bodies) are a transport detail no other module should see.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::error::ClientError;
use super::models::{Emotion, EmotionCount, MovieDetail};
use super::{EmotionGateway, MovieGateway};

/// Gateway that talks to the movie API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApiGateway {
    client: Client,
    base_url: Url,
}

impl HttpApiGateway {
    /// Builds a gateway for the given API base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the base URL cannot be
    /// parsed, or [`ClientError::Configuration`] when the HTTP client
    /// cannot be constructed.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = api_base.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|error| ClientError::InvalidUrl(error.to_string()))?;

        let client = Client::builder().timeout(timeout).build().map_err(|error| {
            ClientError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            }
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|error| ClientError::InvalidUrl(error.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        let response = self
            .client
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let checked = check_status(operation, response).await?;
        checked.json().await.map_err(|error| ClientError::Decode {
            message: format!("{operation} response JSON decoding failed: {error}"),
        })
    }
}

#[async_trait]
impl EmotionGateway for HttpApiGateway {
    async fn emotions(&self) -> Result<Vec<Emotion>, ClientError> {
        let collection: EmotionCollectionRecord =
            self.get_json("load emotions", "api/emotions/").await?;
        Ok(collection.emotions.into_iter().map(Emotion::from).collect())
    }
}

#[async_trait]
impl MovieGateway for HttpApiGateway {
    async fn movie_detail(&self, movie_id: u64) -> Result<MovieDetail, ClientError> {
        let record: MovieDetailRecord = self
            .get_json("load movie detail", &format!("api/movies/{movie_id}/"))
            .await?;
        Ok(record.into())
    }

    async fn submit_rating(&self, movie_id: u64, emotion_id: u64) -> Result<(), ClientError> {
        let operation = "submit rating";
        let endpoint = self.endpoint("api/reviews/")?;
        let body = ReviewSubmissionBody {
            movie_id,
            emotion_id,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        check_status(operation, response).await.map(|_| ())
    }
}

fn map_transport_error(operation: &str, error: &reqwest::Error) -> ClientError {
    if error.is_decode() {
        ClientError::Decode {
            message: format!("{operation} response decoding failed: {error}"),
        }
    } else {
        ClientError::Network {
            message: format!("{operation} failed: {error}"),
        }
    }
}

async fn check_status(operation: &str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_api_message(&body).unwrap_or_else(|| "unknown error".to_owned());
    Err(ClientError::Api {
        message: format!("{operation} failed with status {status}: {message}"),
    })
}

fn extract_api_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .or_else(|| value.get("detail"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

#[derive(Debug, Deserialize)]
struct EmotionCollectionRecord {
    emotions: Vec<EmotionRecord>,
}

#[derive(Debug, Deserialize)]
struct EmotionRecord {
    id: u64,
    emotion: String,
}

impl From<EmotionRecord> for Emotion {
    fn from(record: EmotionRecord) -> Self {
        Self {
            id: record.id,
            name: record.emotion,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieDetailRecord {
    id: u64,
    title: String,
    release_year: u16,
    runtime: u32,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    directors: Vec<String>,
    #[serde(default)]
    cast: Vec<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    emotions: Vec<EmotionCountRecord>,
}

#[derive(Debug, Deserialize)]
struct EmotionCountRecord {
    id: u64,
    emotion: String,
    #[serde(deserialize_with = "count_from_number_or_string")]
    count: u64,
}

impl From<MovieDetailRecord> for MovieDetail {
    fn from(record: MovieDetailRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            release_year: record.release_year,
            runtime: record.runtime,
            overview: record.overview,
            directors: record.directors,
            cast: record.cast,
            poster_path: record.poster_path,
            emotion_counts: record
                .emotions
                .into_iter()
                .map(|count| EmotionCount {
                    emotion_id: count.id,
                    emotion_name: count.emotion,
                    count: count.count,
                })
                .collect(),
        }
    }
}

/// Review body uses camelCase keys, matching the original front end.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewSubmissionBody {
    movie_id: u64,
    emotion_id: u64,
}

/// Counts arrive as JSON numbers from newer servers and as numeric
/// strings from older ones; accept both.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    match RawCount::deserialize(deserializer)? {
        RawCount::Number(value) => Ok(value),
        RawCount::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
