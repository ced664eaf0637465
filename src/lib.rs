//! Enriches a CSV of artist names with Artsy biographies or Guardian articles.

pub mod artist_csv;
pub mod backends;
pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod enrichment;
pub mod http;
pub mod records;
pub mod relevance;
pub mod throttle;
