//! Sequential per-artist enrichment run shared by both sources.

use std::path::Path;

use log::{info, warn};

use crate::artist_csv;
use crate::backends::ArtistEnricher;
use crate::records::ArtistOutcome;
use crate::throttle::Throttle;

/// Rows in input order plus the number of artists that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport<R> {
    pub rows: Vec<R>,
    pub successful: usize,
}

impl<R> RunReport<R> {
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn success_percentage(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.successful as f64 * 100.0 / self.rows.len() as f64
    }

    pub fn summary_line(&self, phrase: &str) -> String {
        format!(
            "Summary: {phrase} {} out of {} artists ({:.2}%).",
            self.successful,
            self.total(),
            self.success_percentage()
        )
    }
}

fn outcome_message<E: ArtistEnricher>(artist: &str, outcome: &ArtistOutcome<E::Found>) -> String {
    match outcome {
        ArtistOutcome::Found(found) => {
            format!("{} '{artist}': {}", E::FOUND_PHRASE, E::describe_found(found))
        }
        ArtistOutcome::NotFound => format!("{} for '{artist}'.", E::NOT_FOUND_MESSAGE),
        ArtistOutcome::Failed(error) => format!("Error processing artist '{artist}': {error}"),
    }
}

/// Looks up every artist in order, recording exactly one row each.
///
/// The throttle is awaited after every artist, whatever the outcome, so
/// consecutive lookups start at least one interval apart.
pub fn enrich_artists<E: ArtistEnricher>(
    enricher: &E,
    artists: &[String],
    throttle: &Throttle,
) -> RunReport<E::Row> {
    let mut rows = Vec::with_capacity(artists.len());
    let mut successful = 0usize;

    throttle.start();
    for artist in artists {
        info!("Processing artist: {artist}");
        let outcome = enricher.lookup(artist);
        let message = outcome_message::<E>(artist, &outcome);
        if let ArtistOutcome::Failed(_) = outcome {
            warn!("{message}");
        } else {
            info!("{message}");
        }
        if outcome.is_found() {
            successful += 1;
        }
        rows.push(E::build_row(artist, outcome));
        throttle.wait();
    }

    RunReport { rows, successful }
}

/// Reads the artist list, enriches it and writes the output file.
///
/// An unreadable input or unwritable output is returned as an error;
/// per-artist failures only show up in the rows.
pub fn run_pipeline<E: ArtistEnricher>(
    enricher: &E,
    input_path: &Path,
    artist_column: &str,
    output_path: &Path,
    throttle: &Throttle,
) -> Result<RunReport<E::Row>, String> {
    let artists = artist_csv::read_artist_names(input_path, artist_column)?;
    info!("Found {} unique artists in the CSV.", artists.len());

    let report = enrich_artists(enricher, &artists, throttle);
    artist_csv::write_rows(output_path, &report.rows)?;
    info!(
        "{}: wrote {} rows to {}",
        enricher.source_name(),
        report.rows.len(),
        output_path.display()
    );
    Ok(report)
}
