//! Display shaping for a loaded movie detail.
//!
//! Pure helpers mirroring the detail modal's layout: a headline with the
//! release year, a credits line, an optional cast line, and the resolved
//! poster URL. Rendering itself belongs to the embedder.

use crate::api::MovieDetail;

/// Base URL for TMDB poster images at the modal's display width.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w396/";

/// Display model for one movie detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// `"{title} ({release_year})"`.
    pub headline: String,
    /// Directors and runtime, e.g. `"by A. Director — 113 mins"`; the
    /// director part is omitted when none are known.
    pub credits_line: String,
    /// Plot summary, unchanged.
    pub overview: String,
    /// `"Cast: ..."` line, absent when no cast is known.
    pub cast_line: Option<String>,
    /// Full poster URL, absent when the movie has no poster.
    pub poster_url: Option<String>,
}

impl DetailView {
    /// Shapes a loaded detail for display.
    #[must_use]
    pub fn from_detail(detail: &MovieDetail) -> Self {
        let headline = format!("{} ({})", detail.title, detail.release_year);

        let credits_line = if detail.directors.is_empty() {
            format!("{} mins", detail.runtime)
        } else {
            format!(
                "by {} — {} mins",
                detail.directors.join(", "),
                detail.runtime
            )
        };

        let cast_line = if detail.cast.is_empty() {
            None
        } else {
            Some(format!("Cast: {}", detail.cast.join(", ")))
        };

        let poster_url = detail
            .poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{}", path.trim_start_matches('/')));

        Self {
            headline,
            credits_line,
            overview: detail.overview.clone(),
            cast_line,
            poster_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::MovieDetail;

    use super::*;

    fn detail() -> MovieDetail {
        MovieDetail {
            id: 42,
            title: "Example Movie".to_owned(),
            release_year: 1997,
            runtime: 113,
            overview: "A movie about examples.".to_owned(),
            directors: vec!["A. Director".to_owned(), "B. Director".to_owned()],
            cast: vec!["C. Actor".to_owned()],
            poster_path: Some("/poster42.jpg".to_owned()),
            emotion_counts: vec![],
        }
    }

    #[test]
    fn shapes_a_fully_populated_detail() {
        let view = DetailView::from_detail(&detail());

        assert_eq!(view.headline, "Example Movie (1997)");
        assert_eq!(view.credits_line, "by A. Director, B. Director — 113 mins");
        assert_eq!(view.cast_line.as_deref(), Some("Cast: C. Actor"));
        assert_eq!(
            view.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w396/poster42.jpg")
        );
    }

    #[test]
    fn omits_directors_cast_and_poster_when_absent() {
        let view = DetailView::from_detail(&MovieDetail {
            directors: vec![],
            cast: vec![],
            poster_path: None,
            ..detail()
        });

        assert_eq!(view.credits_line, "113 mins");
        assert!(view.cast_line.is_none());
        assert!(view.poster_url.is_none());
    }
}
