//! End-to-end rating session flow against a mocked movie API.

use std::sync::Mutex;
use std::time::Duration;

use moodreel::{
    HttpApiGateway, MatchFraction, MovieRatingSession, Notifier, RatingCallback,
    session::OPEN_FAILURE_NOTICE,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn take(&self) -> Vec<String> {
        self.messages
            .lock()
            .expect("messages mutex should be available")
            .drain(..)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .expect("messages mutex should be available")
            .push(message.to_owned());
    }
}

#[derive(Debug, Default)]
struct RecordingCallback {
    calls: Mutex<Vec<(u64, MatchFraction, bool)>>,
}

impl RecordingCallback {
    fn calls(&self) -> Vec<(u64, MatchFraction, bool)> {
        self.calls
            .lock()
            .expect("calls mutex should be available")
            .clone()
    }
}

impl RatingCallback for RecordingCallback {
    fn session_closed(&self, movie_id: u64, fraction: MatchFraction, has_changed: bool) {
        self.calls
            .lock()
            .expect("calls mutex should be available")
            .push((movie_id, fraction, has_changed));
    }
}

async fn mount_movie_42(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/movies/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "title": "Example Movie",
            "release_year": 1997,
            "runtime": 113,
            "overview": "A movie about examples.",
            "directors": ["A. Director"],
            "cast": ["B. Actor"],
            "poster_path": "/poster42.jpg",
            "emotions": [
                { "id": 1, "emotion": "happy", "count": 3 },
                { "id": 2, "emotion": "sad", "count": 1 }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn open_rate_close_reports_the_updated_match_fraction() {
    let server = MockServer::start().await;
    mount_movie_42(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/reviews/"))
        .and(body_json(serde_json::json!({ "movieId": 42, "emotionId": 1 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpApiGateway::new(&server.uri(), TEST_TIMEOUT).expect("gateway should build");
    let notifier = RecordingNotifier::default();
    let callback = RecordingCallback::default();
    let mut session = MovieRatingSession::new(&gateway, &notifier, &callback, "happy");

    session.open(42).await;
    assert!(session.is_open());
    assert_eq!(session.total_ratings(), 4);

    session.rate(1).await;
    assert_eq!(session.total_ratings(), 5);
    assert!(session.has_changed());

    session.close();
    assert_eq!(
        callback.calls(),
        vec![(42, MatchFraction::new(4, 5), true)]
    );
    assert!(notifier.take().is_empty());

    session.settle_clear().await;
    assert!(session.detail().is_none());
}

#[tokio::test]
async fn failed_open_surfaces_one_notification_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/movies/7/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = HttpApiGateway::new(&server.uri(), TEST_TIMEOUT).expect("gateway should build");
    let notifier = RecordingNotifier::default();
    let callback = RecordingCallback::default();
    let mut session = MovieRatingSession::new(&gateway, &notifier, &callback, "happy");

    session.open(7).await;

    assert!(!session.is_open());
    assert!(session.detail().is_none());
    assert_eq!(notifier.take(), vec![OPEN_FAILURE_NOTICE.to_owned()]);

    session.close();
    assert!(callback.calls().is_empty(), "closed session must not report");
}

#[tokio::test]
async fn failed_rating_does_not_touch_local_counts() {
    let server = MockServer::start().await;
    mount_movie_42(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/reviews/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gateway = HttpApiGateway::new(&server.uri(), TEST_TIMEOUT).expect("gateway should build");
    let notifier = RecordingNotifier::default();
    let callback = RecordingCallback::default();
    let mut session = MovieRatingSession::new(&gateway, &notifier, &callback, "happy");

    session.open(42).await;
    session.rate(1).await;

    assert_eq!(session.total_ratings(), 4);
    assert!(!session.has_changed());
    assert_eq!(notifier.take().len(), 1);

    session.close();
    assert_eq!(
        callback.calls(),
        vec![(42, MatchFraction::new(3, 4), false)]
    );
}
