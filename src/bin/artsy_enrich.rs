//! Looks up every artist of the input CSV on Artsy and writes their biographies.

use std::path::Path;

use artist_enrichment::backends::artsy::{ArtsyClient, ArtsyCredentials};
use artist_enrichment::backends::ArtistEnricher;
use artist_enrichment::http::UreqTransport;
use artist_enrichment::throttle::Throttle;
use artist_enrichment::{bootstrap, credentials, enrichment};
use log::{error, info};

fn run() -> Result<(), String> {
    let config = bootstrap::start()?;

    let client_id = config.artsy.client_id.trim().to_string();
    if client_id.is_empty() {
        return Err("artsy.client_id is not set in the config file".to_string());
    }
    let credentials = ArtsyCredentials {
        client_id,
        client_secret: credentials::artsy_client_secret(&config.artsy.client_secret)?,
    };

    let transport = UreqTransport::new(&config.http);
    let client = ArtsyClient::connect(transport, &config.artsy.api_base_url, &credentials)?;
    info!("Xapp token obtained.");

    let output_path = Path::new(&config.artsy.output_path);
    let report = enrichment::run_pipeline(
        &client,
        Path::new(&config.input.path),
        &config.input.artist_column,
        output_path,
        &Throttle::from_millis(config.throttle.interval_ms),
    )?;

    println!(
        "{}",
        report.summary_line(<ArtsyClient<UreqTransport> as ArtistEnricher>::SUMMARY_PHRASE)
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
