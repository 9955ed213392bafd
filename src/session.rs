//! Movie rating session state machine.
//!
//! A session is opened for one movie under one emotion: it fetches the
//! movie's detail, lets the user submit emotion ratings, and reports the
//! match fraction for its emotion when it closes. Rating counts are
//! updated optimistically: a successful submission increments the local
//! tally without re-fetching, so local state may diverge from the server
//! between submissions. Reconciliation happens only on the next full
//! reopen.

use std::time::Duration;

use crate::api::{ClientError, MovieDetail, MovieGateway};
use crate::notify::Notifier;

/// Delay between closing a session and clearing its detail.
///
/// Exit transitions read the stale detail during this window, so the
/// clear is deliberately deferred past the close itself.
pub const DETAIL_CLEAR_DELAY: Duration = Duration::from_millis(250);

/// Notification shown when the detail fetch fails.
pub const OPEN_FAILURE_NOTICE: &str =
    "Could not retrieve information about the movie. Please try again.";

/// Notification shown when a rating submission fails.
pub const RATE_FAILURE_NOTICE: &str =
    "Could not save your rating for the movie. Please try again.";

/// Ratio of ratings matching one emotion to all ratings for a movie.
///
/// Kept as an integer pair so callers decide when (and whether) to go
/// through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchFraction {
    matched: u64,
    total: u64,
}

impl MatchFraction {
    /// Fraction of a movie with no ratings at all.
    pub const ZERO: Self = Self {
        matched: 0,
        total: 0,
    };

    /// Builds a fraction from a matched count and a total.
    #[must_use]
    pub const fn new(matched: u64, total: u64) -> Self {
        Self { matched, total }
    }

    /// Number of ratings for the matched emotion.
    #[must_use]
    pub const fn matched(&self) -> u64 {
        self.matched
    }

    /// Total ratings across all emotions.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Fraction as a float in `0.0..=1.0`.
    ///
    /// An empty total yields zero rather than dividing by it.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "display-only ratio of small rating counts"
    )]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    /// Fraction as a percentage in `0.0..=100.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "display-only percentage")]
    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

/// Collaborator told about a finished session so list views can refresh
/// the displayed match percentage for that movie.
#[cfg_attr(test, mockall::automock)]
pub trait RatingCallback: Send + Sync {
    /// Invoked once per close with the movie, its match fraction for the
    /// emotion the session was opened under, and whether any rating was
    /// submitted while it was open.
    fn session_closed(&self, movie_id: u64, fraction: MatchFraction, has_changed: bool);
}

/// Observable state of a rating session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingSessionState {
    /// Whether the session is currently open.
    pub is_open: bool,
    /// Detail of the loaded movie, if any.
    ///
    /// Still present for [`DETAIL_CLEAR_DELAY`] after a close.
    pub detail: Option<MovieDetail>,
    /// Sum of `count` across the loaded detail's emotion counts, kept in
    /// step with `detail` on every fetch and local increment.
    pub total_ratings: u64,
    /// Whether at least one rating was submitted since the last open.
    pub has_changed: bool,
}

/// One row of the percentage list shown for a loaded detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionPercentage {
    /// Identifier of the emotion.
    pub emotion_id: u64,
    /// Display name of the emotion.
    pub emotion_name: String,
    /// Share of the movie's ratings carrying this emotion.
    pub fraction: MatchFraction,
}

/// Handle for one in-flight detail fetch.
///
/// Completing an open with a ticket issued before the last cancellation
/// is a no-op, which is what keeps torn-down sessions from mutating
/// state when a late response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct OpenTicket {
    movie_id: u64,
    epoch: u64,
}

impl OpenTicket {
    /// Movie the fetch was issued for.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }
}

/// State machine for viewing one movie's detail and rating it by emotion.
///
/// Two states: **Closed** (initial) and **Open**. Opening while already
/// open is allowed and simply replaces the loaded detail. All mutation
/// happens on the caller's single event thread; the only asynchronous
/// hazard, a detail fetch outliving its session, is handled by the
/// [`OpenTicket`] cancellation check.
pub struct MovieRatingSession<'client, Gateway, Notify, Callback>
where
    Gateway: MovieGateway,
    Notify: Notifier,
    Callback: RatingCallback,
{
    gateway: &'client Gateway,
    notifier: &'client Notify,
    callback: &'client Callback,
    opened_under: String,
    state: RatingSessionState,
    pending_open: Option<OpenTicket>,
    cancel_epoch: u64,
    clear_pending: bool,
}

impl<'client, Gateway, Notify, Callback> MovieRatingSession<'client, Gateway, Notify, Callback>
where
    Gateway: MovieGateway,
    Notify: Notifier,
    Callback: RatingCallback,
{
    /// Creates a closed session opened-under the given emotion name.
    #[must_use]
    pub fn new(
        gateway: &'client Gateway,
        notifier: &'client Notify,
        callback: &'client Callback,
        opened_under: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            callback,
            opened_under: opened_under.into(),
            state: RatingSessionState::default(),
            pending_open: None,
            cancel_epoch: 0,
            clear_pending: false,
        }
    }

    /// Current observable state.
    #[must_use]
    pub const fn state(&self) -> &RatingSessionState {
        &self.state
    }

    /// Whether the session is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Loaded movie detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&MovieDetail> {
        self.state.detail.as_ref()
    }

    /// Total ratings across all emotions for the loaded detail.
    #[must_use]
    pub const fn total_ratings(&self) -> u64 {
        self.state.total_ratings
    }

    /// Whether a rating was submitted since the last open.
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.state.has_changed
    }

    /// Fetches the movie's detail and opens the session on success.
    ///
    /// On failure the session state is unchanged and a transient error
    /// notification is surfaced; the user must re-trigger the open.
    pub async fn open(&mut self, movie_id: u64) {
        let ticket = self.begin_open(movie_id);
        let result = self.gateway.movie_detail(movie_id).await;
        self.complete_open(&ticket, result);
    }

    /// Issues a ticket for an open, marking the fetch as in flight.
    pub fn begin_open(&mut self, movie_id: u64) -> OpenTicket {
        let ticket = OpenTicket {
            movie_id,
            epoch: self.cancel_epoch,
        };
        self.pending_open = Some(ticket.clone());
        ticket
    }

    /// Applies the result of a detail fetch.
    ///
    /// A ticket issued before the last [`cancel_pending_open`] is stale
    /// and its result is discarded without touching state.
    ///
    /// [`cancel_pending_open`]: Self::cancel_pending_open
    pub fn complete_open(&mut self, ticket: &OpenTicket, result: Result<MovieDetail, ClientError>) {
        if ticket.epoch != self.cancel_epoch {
            tracing::debug!(
                movie_id = ticket.movie_id,
                "discarding detail response for a cancelled open"
            );
            return;
        }
        if self.pending_open.as_ref() == Some(ticket) {
            self.pending_open = None;
        }

        match result {
            Ok(detail) => {
                let total_ratings = detail.total_ratings();
                tracing::debug!(movie_id = detail.id, total_ratings, "session opened");
                self.state = RatingSessionState {
                    is_open: true,
                    detail: Some(detail),
                    total_ratings,
                    has_changed: false,
                };
                self.clear_pending = false;
            }
            Err(error) => {
                tracing::debug!(
                    movie_id = ticket.movie_id,
                    "movie detail fetch failed: {error}"
                );
                self.notifier.error(OPEN_FAILURE_NOTICE);
            }
        }
    }

    /// Invalidates every ticket issued so far, so any in-flight open's
    /// eventual response is discarded. Called on teardown.
    ///
    /// The epoch is bumped unconditionally: with overlapping opens only
    /// the most recent ticket is tracked as pending, but every ticket
    /// issued before the cancellation must be rejected.
    pub fn cancel_pending_open(&mut self) {
        self.pending_open = None;
        self.cancel_epoch += 1;
    }

    /// Submits a rating for the loaded movie with the given emotion.
    ///
    /// Ignored unless the session is open with a loaded detail. On
    /// success the matching count and the total are both incremented by
    /// exactly one; on failure state is unchanged and a transient error
    /// notification is surfaced. Submissions are fire-and-forget: rapid
    /// repeats each count independently.
    pub async fn rate(&mut self, emotion_id: u64) {
        let Some(movie_id) = self.loaded_movie_id() else {
            tracing::debug!(emotion_id, "ignoring rating while no movie detail is open");
            return;
        };

        match self.gateway.submit_rating(movie_id, emotion_id).await {
            Ok(()) => self.apply_rating(emotion_id),
            Err(error) => {
                tracing::debug!(movie_id, emotion_id, "rating submission failed: {error}");
                self.notifier.error(RATE_FAILURE_NOTICE);
            }
        }
    }

    /// Closes the session, reporting the match fraction for the emotion
    /// it was opened under.
    ///
    /// A no-op while closed. The callback fires even when no ratings are
    /// loaded; the fraction is then zero. The visible state flips to
    /// closed immediately, but the detail is only cleared once
    /// [`settle_clear`] runs out the [`DETAIL_CLEAR_DELAY`] window.
    ///
    /// [`settle_clear`]: Self::settle_clear
    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }

        let fraction = self.match_fraction();
        if let Some(detail) = self.state.detail.as_ref() {
            self.callback
                .session_closed(detail.id, fraction, self.state.has_changed);
        }

        self.state.has_changed = false;
        self.state.is_open = false;
        self.clear_pending = true;
    }

    /// Fraction of loaded ratings matching the opened-under emotion.
    ///
    /// Zero when nothing is loaded, when the movie has no ratings, or
    /// when the emotion is absent from the loaded counts.
    #[must_use]
    pub fn match_fraction(&self) -> MatchFraction {
        let Some(detail) = self.state.detail.as_ref() else {
            return MatchFraction::ZERO;
        };
        let matched = detail
            .emotion_counts
            .iter()
            .find(|count| count.emotion_name == self.opened_under)
            .map_or(0, |count| count.count);
        MatchFraction::new(matched, self.state.total_ratings)
    }

    /// Per-emotion match fractions for the loaded detail, in server
    /// order. Empty while nothing is loaded.
    #[must_use]
    pub fn percentages(&self) -> Vec<EmotionPercentage> {
        let Some(detail) = self.state.detail.as_ref() else {
            return Vec::new();
        };
        detail
            .emotion_counts
            .iter()
            .map(|count| EmotionPercentage {
                emotion_id: count.emotion_id,
                emotion_name: count.emotion_name.clone(),
                fraction: MatchFraction::new(count.count, self.state.total_ratings),
            })
            .collect()
    }

    /// Waits out the clear delay after a close, then clears the detail.
    ///
    /// Does nothing unless a close left a clear pending.
    pub async fn settle_clear(&mut self) {
        if !self.clear_pending {
            return;
        }
        tokio::time::sleep(DETAIL_CLEAR_DELAY).await;
        self.clear_now();
    }

    /// Clears the detail immediately, for teardown paths that cannot
    /// wait out the transition window.
    pub fn clear_now(&mut self) {
        self.state.detail = None;
        self.state.total_ratings = 0;
        self.clear_pending = false;
    }

    fn loaded_movie_id(&self) -> Option<u64> {
        if !self.state.is_open {
            return None;
        }
        self.state.detail.as_ref().map(|detail| detail.id)
    }

    fn apply_rating(&mut self, emotion_id: u64) {
        let Some(entry) = self
            .state
            .detail
            .as_mut()
            .and_then(|detail| {
                detail
                    .emotion_counts
                    .iter_mut()
                    .find(|count| count.emotion_id == emotion_id)
            })
        else {
            tracing::warn!(
                emotion_id,
                "accepted rating references an emotion missing from the loaded detail"
            );
            return;
        };

        entry.count += 1;
        self.state.total_ratings += 1;
        self.state.has_changed = true;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
