//! Searches the Guardian archive for one relevant article per artist of the input CSV.

use std::path::Path;

use artist_enrichment::backends::guardian::{GuardianClient, GuardianSearchOptions};
use artist_enrichment::backends::ArtistEnricher;
use artist_enrichment::http::UreqTransport;
use artist_enrichment::throttle::Throttle;
use artist_enrichment::{bootstrap, credentials, enrichment};
use log::error;

fn run() -> Result<(), String> {
    let config = bootstrap::start()?;
    let api_key = credentials::guardian_api_key(&config.guardian.api_key)?;

    let client = GuardianClient::new(
        UreqTransport::new(&config.http),
        &config.guardian.api_base_url,
        api_key,
        GuardianSearchOptions::from(&config.guardian),
    );

    let output_path = Path::new(&config.guardian.output_path);
    let report = enrichment::run_pipeline(
        &client,
        Path::new(&config.input.path),
        &config.input.artist_column,
        output_path,
        &Throttle::from_millis(config.throttle.interval_ms),
    )?;

    println!(
        "{}",
        report.summary_line(<GuardianClient<UreqTransport> as ArtistEnricher>::SUMMARY_PHRASE)
    );
    println!("Results saved to '{}'.", output_path.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().map_err(|err| {
        error!("{err}");
        err.into()
    })
}
