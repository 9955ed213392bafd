//! Domain model for emotions and movie details.

/// A named mood used both to filter movies and to tag ratings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emotion {
    /// Stable identifier assigned by the server.
    pub id: u64,
    /// Display name (e.g. `"happy"`).
    pub name: String,
}

/// Rating tally for one emotion on one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionCount {
    /// Identifier of the emotion being counted.
    pub emotion_id: u64,
    /// Display name of the emotion being counted.
    pub emotion_name: String,
    /// Number of ratings tagging the movie with this emotion.
    pub count: u64,
}

/// Full detail record for a single movie.
///
/// The emotion counts keep the server-provided order so percentage lists
/// render stably across refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetail {
    /// Stable identifier assigned by the server.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// Year of first release.
    pub release_year: u16,
    /// Runtime in minutes.
    pub runtime: u32,
    /// Plot summary.
    pub overview: String,
    /// Director names, possibly empty.
    pub directors: Vec<String>,
    /// Principal cast names, possibly empty.
    pub cast: Vec<String>,
    /// TMDB poster path fragment, when the movie has a poster.
    pub poster_path: Option<String>,
    /// Per-emotion rating tallies in server order.
    pub emotion_counts: Vec<EmotionCount>,
}

impl MovieDetail {
    /// Sum of rating counts across all emotions.
    #[must_use]
    pub fn total_ratings(&self) -> u64 {
        self.emotion_counts.iter().map(|count| count.count).sum()
    }
}
