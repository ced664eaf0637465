//! Artsy biography lookup: XApp token exchange, artist search and detail fetch.

use serde_json::Value;

use crate::backends::ArtistEnricher;
use crate::http::{optional_str, HttpRequest, JsonTransport};
use crate::records::{ArtistDetail, ArtistOutcome, ArtsyMatch, ArtsyRow, ARTSY_NOT_FOUND};

const TOKEN_HEADER: &str = "X-Xapp-Token";
const ACCEPT_HEADER_VALUE: &str = "application/vnd.artsy-v2+json";

/// Client credentials exchanged for an XApp token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtsyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Exchanges client credentials for a short-lived XApp token.
pub fn fetch_xapp_token<T: JsonTransport>(
    transport: &T,
    api_base_url: &str,
    credentials: &ArtsyCredentials,
) -> Result<String, String> {
    let request = HttpRequest::post(format!("{api_base_url}/tokens/xapp_token"))
        .query("client_id", credentials.client_id.as_str())
        .query("client_secret", credentials.client_secret.as_str());
    let payload = transport
        .send_json(&request)
        .map_err(|err| format!("Artsy token request failed: {err}"))?;
    optional_str(&payload, "token")
        .ok_or_else(|| "Artsy token response missing token".to_string())
}

/// Authenticated Artsy client. Every request carries the same token.
pub struct ArtsyClient<T> {
    transport: T,
    api_base_url: String,
    token: String,
}

impl<T: JsonTransport> ArtsyClient<T> {
    /// Acquires a token and returns a ready client. Failure here is fatal for a run.
    pub fn connect(
        transport: T,
        api_base_url: &str,
        credentials: &ArtsyCredentials,
    ) -> Result<Self, String> {
        let token = fetch_xapp_token(&transport, api_base_url, credentials)?;
        Ok(Self::with_token(transport, api_base_url, token))
    }

    pub fn with_token(transport: T, api_base_url: &str, token: impl Into<String>) -> Self {
        Self {
            transport,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        request
            .header(TOKEN_HEADER, self.token.as_str())
            .header("Accept", ACCEPT_HEADER_VALUE)
    }

    fn search_results(payload: &Value) -> &[Value] {
        payload
            .get("response")
            .and_then(|value| value.get("results"))
            .or_else(|| {
                payload
                    .get("_embedded")
                    .and_then(|value| value.get("results"))
            })
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn result_id(result: &Value) -> Option<String> {
        optional_str(result, "id").or_else(|| {
            result
                .pointer("/_links/self/href")
                .and_then(Value::as_str)
                .and_then(|href| href.trim_end_matches('/').rsplit('/').next())
                .filter(|segment| !segment.is_empty())
                .map(ToOwned::to_owned)
        })
    }

    /// Id of the first artist search result. No disambiguation is attempted.
    pub fn search_first_artist_id(&self, artist: &str) -> Result<Option<String>, String> {
        let request = self.authorized(
            HttpRequest::get(format!("{}/search", self.api_base_url))
                .query("q", artist)
                .query("type", "artist"),
        );
        let payload = self
            .transport
            .send_json(&request)
            .map_err(|err| format!("Artsy search failed: {err}"))?;
        Ok(Self::search_results(&payload)
            .first()
            .and_then(Self::result_id))
    }

    pub fn fetch_artist(&self, artsy_id: &str) -> Result<ArtistDetail, String> {
        let trimmed_id = artsy_id.trim();
        if trimmed_id.is_empty() {
            return Err("Artsy artist id cannot be empty".to_string());
        }
        let request = self.authorized(HttpRequest::get(format!(
            "{}/artists/{}",
            self.api_base_url,
            urlencoding::encode(trimmed_id)
        )));
        let payload = self
            .transport
            .send_json(&request)
            .map_err(|err| format!("Artsy artist request failed: {err}"))?;
        if !payload.is_object() {
            return Err("Artsy artist response is not an object".to_string());
        }
        Ok(ArtistDetail {
            name: optional_str(&payload, "name"),
            birthday: optional_str(&payload, "birthday"),
            hometown: optional_str(&payload, "hometown"),
            biography: optional_str(&payload, "biography"),
        })
    }
}

impl<T: JsonTransport> ArtistEnricher for ArtsyClient<T> {
    type Found = ArtsyMatch;
    type Row = ArtsyRow;

    const SUMMARY_PHRASE: &'static str = "Found data for";
    const FOUND_PHRASE: &'static str = "Found data for";
    const NOT_FOUND_MESSAGE: &'static str = ARTSY_NOT_FOUND;

    fn source_name(&self) -> &'static str {
        "Artsy"
    }

    fn lookup(&self, artist: &str) -> ArtistOutcome<ArtsyMatch> {
        let matched = self.search_first_artist_id(artist).and_then(|artsy_id| {
            artsy_id
                .map(|artsy_id| {
                    self.fetch_artist(&artsy_id)
                        .map(|detail| ArtsyMatch { artsy_id, detail })
                })
                .transpose()
        });
        matched.into()
    }

    fn describe_found(found: &ArtsyMatch) -> String {
        found
            .detail
            .name
            .clone()
            .unwrap_or_else(|| found.artsy_id.clone())
    }

    fn build_row(artist: &str, outcome: ArtistOutcome<ArtsyMatch>) -> ArtsyRow {
        ArtsyRow::from_outcome(artist, outcome)
    }
}
