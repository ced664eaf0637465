//! Per-artist lookup outcomes and the enriched rows built from them.

pub const ARTSY_NOT_FOUND: &str = "Artist not found";
pub const GUARDIAN_NOT_FOUND: &str = "No relevant article found";

/// Terminal state of one artist after its lookup finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistOutcome<T> {
    Found(T),
    NotFound,
    Failed(String),
}

impl<T> ArtistOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<T> From<Result<Option<T>, String>> for ArtistOutcome<T> {
    fn from(result: Result<Option<T>, String>) -> Self {
        match result {
            Ok(Some(found)) => Self::Found(found),
            Ok(None) => Self::NotFound,
            Err(error) => Self::Failed(error),
        }
    }
}

/// A row type that can be written to the output CSV.
pub trait EnrichedRow {
    /// Column names, excluding the trailing `error` column.
    const COLUMNS: &'static [&'static str];

    /// Cell values in `COLUMNS` order; `None` is written as an empty cell.
    fn values(&self) -> Vec<Option<&str>>;

    fn error(&self) -> Option<&str>;
}

/// Full Artsy artist record as returned by the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistDetail {
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub hometown: Option<String>,
    pub biography: Option<String>,
}

/// Artsy hit: the id the search resolved to plus its detail record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtsyMatch {
    pub artsy_id: String,
    pub detail: ArtistDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtsyRow {
    pub artist: String,
    pub artsy_id: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub hometown: Option<String>,
    pub biography: Option<String>,
    pub error: Option<String>,
}

impl ArtsyRow {
    pub fn from_outcome(artist: &str, outcome: ArtistOutcome<ArtsyMatch>) -> Self {
        match outcome {
            ArtistOutcome::Found(found) => Self {
                artist: artist.to_string(),
                artsy_id: Some(found.artsy_id),
                name: found.detail.name,
                birthday: found.detail.birthday,
                hometown: found.detail.hometown,
                biography: found.detail.biography,
                error: None,
            },
            ArtistOutcome::NotFound => Self::error_row(artist, ARTSY_NOT_FOUND),
            ArtistOutcome::Failed(error) => Self::error_row(artist, error),
        }
    }

    fn error_row(artist: &str, error: impl Into<String>) -> Self {
        Self {
            artist: artist.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl EnrichedRow for ArtsyRow {
    const COLUMNS: &'static [&'static str] = &[
        "artist",
        "artsy_id",
        "name",
        "birthday",
        "hometown",
        "biography",
    ];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.artist.as_str()),
            self.artsy_id.as_deref(),
            self.name.as_deref(),
            self.birthday.as_deref(),
            self.hometown.as_deref(),
            self.biography.as_deref(),
        ]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Guardian search result with the fields the relevance filter reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub id: Option<String>,
    pub section_name: String,
    pub publication_date: String,
    pub title: String,
    pub url: String,
    pub trail_text: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardianRow {
    pub artist: String,
    pub article_id: Option<String>,
    pub article_title: Option<String>,
    pub publication_date: Option<String>,
    pub article_url: Option<String>,
    pub snippet: Option<String>,
    pub error: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl GuardianRow {
    pub fn from_outcome(artist: &str, outcome: ArtistOutcome<Article>) -> Self {
        match outcome {
            ArtistOutcome::Found(article) => Self {
                artist: artist.to_string(),
                article_id: article.id,
                article_title: non_empty(article.title),
                publication_date: non_empty(article.publication_date),
                article_url: non_empty(article.url),
                snippet: non_empty(article.trail_text),
                error: None,
            },
            ArtistOutcome::NotFound => Self::error_row(artist, GUARDIAN_NOT_FOUND),
            ArtistOutcome::Failed(error) => Self::error_row(artist, error),
        }
    }

    fn error_row(artist: &str, error: impl Into<String>) -> Self {
        Self {
            artist: artist.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl EnrichedRow for GuardianRow {
    const COLUMNS: &'static [&'static str] = &[
        "artist",
        "article_id",
        "article_title",
        "publication_date",
        "article_url",
        "snippet",
    ];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.artist.as_str()),
            self.article_id.as_deref(),
            self.article_title.as_deref(),
            self.publication_date.as_deref(),
            self.article_url.as_deref(),
            self.snippet.as_deref(),
        ]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
