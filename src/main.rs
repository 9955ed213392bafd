//! Moodreel CLI entrypoint for browsing emotions and inspecting movies.

use std::io::{self, Write};
use std::process::ExitCode;

use moodreel::{
    ClientError, DetailView, EmotionCatalog, HttpApiGateway, MatchFraction, MoodreelConfig,
    MovieRatingSession, NoopPageChrome, RatingCallback, StderrNotifier,
};
use ortho_config::OrthoConfig;

/// Outcome of a CLI run whose failure was already reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliOutcome {
    Success,
    Failure,
}

impl From<CliOutcome> for ExitCode {
    fn from(outcome: CliOutcome) -> Self {
        match outcome {
            CliOutcome::Success => Self::SUCCESS,
            CliOutcome::Failure => Self::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(outcome) => outcome.into(),
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<CliOutcome, ClientError> {
    let config = load_config()?;
    let gateway = HttpApiGateway::new(&config.resolve_api_base_url(), config.request_timeout())?;

    match config.movie_id {
        Some(movie_id) => inspect_movie(&gateway, &config, movie_id).await,
        None => list_emotions(&gateway).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ClientError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<MoodreelConfig, ClientError> {
    MoodreelConfig::load().map_err(|error| ClientError::Configuration {
        message: error.to_string(),
    })
}

async fn list_emotions(gateway: &HttpApiGateway) -> Result<CliOutcome, ClientError> {
    let chrome = NoopPageChrome;
    let mut catalog = EmotionCatalog::new(gateway, &chrome);
    catalog.load().await;

    let catalog_view = catalog.view();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", catalog_view.heading).map_err(map_io)?;
    if catalog_view.entries.is_empty() {
        writeln!(stdout, "  (no emotions available; is the API reachable?)").map_err(map_io)?;
    }
    for entry in &catalog_view.entries {
        writeln!(stdout, "  {}  ->  {}", entry.name, entry.nav_target).map_err(map_io)?;
    }
    writeln!(stdout, "{}", catalog_view.rate_prompt).map_err(map_io)?;
    Ok(CliOutcome::Success)
}

async fn inspect_movie(
    gateway: &HttpApiGateway,
    config: &MoodreelConfig,
    movie_id: u64,
) -> Result<CliOutcome, ClientError> {
    let notifier = StderrNotifier;
    let callback = SummaryCallback;
    let mut session =
        MovieRatingSession::new(gateway, &notifier, &callback, config.resolve_emotion());

    session.open(movie_id).await;
    if !session.is_open() {
        // The notifier already surfaced the failure; exit non-zero
        // without repeating it.
        return Ok(CliOutcome::Failure);
    }

    if let Some(emotion_id) = config.rate_emotion_id {
        session.rate(emotion_id).await;
    }

    write_detail(&session)?;
    session.close();
    session.settle_clear().await;
    Ok(CliOutcome::Success)
}

fn write_detail(
    session: &MovieRatingSession<'_, HttpApiGateway, StderrNotifier, SummaryCallback>,
) -> Result<(), ClientError> {
    let Some(detail) = session.detail() else {
        return Ok(());
    };
    let detail_view = DetailView::from_detail(detail);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", detail_view.headline).map_err(map_io)?;
    writeln!(stdout, "{}", detail_view.credits_line).map_err(map_io)?;
    if !detail_view.overview.is_empty() {
        writeln!(stdout, "{}", detail_view.overview).map_err(map_io)?;
    }
    if let Some(cast_line) = &detail_view.cast_line {
        writeln!(stdout, "{cast_line}").map_err(map_io)?;
    }
    if let Some(poster_url) = &detail_view.poster_url {
        writeln!(stdout, "Poster: {poster_url}").map_err(map_io)?;
    }
    for row in session.percentages() {
        writeln!(
            stdout,
            "  {:>3.0}%  {}",
            row.fraction.percent(),
            row.emotion_name
        )
        .map_err(map_io)?;
    }
    Ok(())
}

fn map_io(error: io::Error) -> ClientError {
    ClientError::Io {
        message: error.to_string(),
    }
}

/// Prints the close summary the way a list view would consume it.
struct SummaryCallback;

impl RatingCallback for SummaryCallback {
    fn session_closed(&self, movie_id: u64, fraction: MatchFraction, has_changed: bool) {
        let mut stdout = io::stdout().lock();
        let _ignored = writeln!(
            stdout,
            "movie {movie_id}: match {:.0}% ({}/{}), changed: {has_changed}",
            fraction.percent(),
            fraction.matched(),
            fraction.total()
        );
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn failed_open_exits_nonzero_without_a_second_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/movies/7/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let config = MoodreelConfig {
            api_base_url: Some(server.uri()),
            movie_id: Some(7),
            ..MoodreelConfig::default()
        };
        let gateway = HttpApiGateway::new(&config.resolve_api_base_url(), config.request_timeout())
            .expect("gateway should build");

        let outcome = inspect_movie(&gateway, &config, 7)
            .await
            .expect("a failed open is not a hard error");

        assert_eq!(outcome, CliOutcome::Failure);
    }
}
