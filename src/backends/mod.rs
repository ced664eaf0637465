//! Remote enrichment sources and the interface the run loop drives them through.

pub mod artsy;
pub mod guardian;

use crate::records::{ArtistOutcome, EnrichedRow};

/// One enrichment source: resolves an artist name into a terminal outcome.
pub trait ArtistEnricher {
    /// Payload produced for a matched artist.
    type Found;
    /// Output row type written for every artist.
    type Row: EnrichedRow;

    /// Completes "Summary: {phrase} S out of T artists".
    const SUMMARY_PHRASE: &'static str;
    /// Prefixes "'{artist}': {label}" in the log line emitted on a match.
    const FOUND_PHRASE: &'static str;
    /// Sentinel written for an artist without a match.
    const NOT_FOUND_MESSAGE: &'static str;

    fn source_name(&self) -> &'static str;

    /// Runs the full lookup for one artist. Never retries.
    fn lookup(&self, artist: &str) -> ArtistOutcome<Self::Found>;

    /// Short label for the log line emitted on a match.
    fn describe_found(found: &Self::Found) -> String;

    fn build_row(artist: &str, outcome: ArtistOutcome<Self::Found>) -> Self::Row;
}
