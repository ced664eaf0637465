//! Guardian Content API article search with page-limited pagination.

use log::debug;
use serde_json::Value;

use crate::backends::ArtistEnricher;
use crate::config::GuardianConfig;
use crate::http::{HttpRequest, JsonTransport};
use crate::records::{ArtistOutcome, Article, GuardianRow, GUARDIAN_NOT_FOUND};
use crate::relevance;

const SHOW_FIELDS: &str = "trailText,body";
const ORDER_BY: &str = "relevance";

/// Search window and paging applied to every artist query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianSearchOptions {
    pub from_date: String,
    pub to_date: String,
    pub page_size: u32,
    pub max_pages: u32,
    pub section: String,
}

impl From<&GuardianConfig> for GuardianSearchOptions {
    fn from(config: &GuardianConfig) -> Self {
        Self {
            from_date: config.from_date.clone(),
            to_date: config.to_date.clone(),
            page_size: config.page_size,
            max_pages: config.max_pages,
            section: config.section.clone(),
        }
    }
}

impl Default for GuardianSearchOptions {
    fn default() -> Self {
        Self::from(&GuardianConfig::default())
    }
}

/// Guardian client authenticated with a static API key.
pub struct GuardianClient<T> {
    transport: T,
    api_base_url: String,
    api_key: String,
    options: GuardianSearchOptions,
}

impl<T: JsonTransport> GuardianClient<T> {
    pub fn new(
        transport: T,
        api_base_url: &str,
        api_key: impl Into<String>,
        options: GuardianSearchOptions,
    ) -> Self {
        Self {
            transport,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            options,
        }
    }

    /// The artist name is quoted and paired with "artist" to stay on art coverage.
    fn search_query(artist: &str) -> String {
        format!("\"{artist}\" artist")
    }

    fn parse_article(result: &Value) -> Article {
        let text = |value: Option<&Value>| {
            value
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let field = |key: &str| text(result.get("fields").and_then(|fields| fields.get(key)));
        Article {
            id: result
                .get("id")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
            section_name: text(result.get("sectionName")),
            publication_date: text(result.get("webPublicationDate")),
            title: text(result.get("webTitle")),
            url: text(result.get("webUrl")),
            trail_text: field("trailText"),
            body: field("body"),
        }
    }

    /// One page of results, or `None` when the payload has no result list.
    fn fetch_page(&self, artist: &str, page: u32) -> Result<Option<Vec<Article>>, String> {
        let request = HttpRequest::get(format!("{}/search", self.api_base_url))
            .query("q", Self::search_query(artist))
            .query("from-date", self.options.from_date.as_str())
            .query("to-date", self.options.to_date.as_str())
            .query("api-key", self.api_key.as_str())
            .query("show-fields", SHOW_FIELDS)
            .query("page-size", self.options.page_size.to_string())
            .query("page", page.to_string())
            .query("order-by", ORDER_BY)
            .query("section", self.options.section.as_str());
        let payload = self
            .transport
            .send_json(&request)
            .map_err(|err| format!("Guardian search failed (page {page}): {err}"))?;
        Ok(payload
            .get("response")
            .and_then(|value| value.get("results"))
            .and_then(Value::as_array)
            .map(|results| results.iter().map(Self::parse_article).collect()))
    }

    /// Articles for `artist` across at most `max_pages` pages, in service order.
    ///
    /// Only a failed first page is an error. The service rejects pages past the
    /// last one, so a later failure ends paging with what was already gathered.
    pub fn search_articles(&self, artist: &str) -> Result<Vec<Article>, String> {
        let mut articles = Vec::new();
        for page in 1..=self.options.max_pages {
            let fetched = match self.fetch_page(artist, page) {
                Ok(fetched) => fetched,
                Err(err) if page > 1 => {
                    debug!("Guardian[{artist}]: stopping after page {}: {err}", page - 1);
                    break;
                }
                Err(err) => return Err(err),
            };
            match fetched {
                Some(page_articles) if !page_articles.is_empty() => {
                    articles.extend(page_articles);
                }
                Some(_) => break,
                None => {
                    debug!("Guardian[{artist}]: page {page} had no result list, stopping");
                    break;
                }
            }
        }
        Ok(articles)
    }
}

impl<T: JsonTransport> ArtistEnricher for GuardianClient<T> {
    type Found = Article;
    type Row = GuardianRow;

    const SUMMARY_PHRASE: &'static str = "Found relevant articles for";
    const FOUND_PHRASE: &'static str = "Found article for";
    const NOT_FOUND_MESSAGE: &'static str = GUARDIAN_NOT_FOUND;

    fn source_name(&self) -> &'static str {
        "Guardian"
    }

    fn lookup(&self, artist: &str) -> ArtistOutcome<Article> {
        self.search_articles(artist)
            .map(|articles| relevance::select_relevant(artist, &articles).cloned())
            .into()
    }

    fn describe_found(found: &Article) -> String {
        found.title.clone()
    }

    fn build_row(artist: &str, outcome: ArtistOutcome<Article>) -> GuardianRow {
        GuardianRow::from_outcome(artist, outcome)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{GuardianClient, GuardianSearchOptions};
    use crate::backends::ArtistEnricher;
    use crate::http::testing::ScriptedTransport;
    use crate::records::ArtistOutcome;

    const BASE_URL: &str = "https://content.guardian.test";

    fn article_json(id: &str, title: &str, body: &str) -> Value {
        json!({
            "id": id,
            "sectionName": "Art and design",
            "webPublicationDate": "2018-06-01T10:00:00Z",
            "webTitle": title,
            "webUrl": format!("https://www.guardian.test/{id}"),
            "fields": {"trailText": "", "body": body}
        })
    }

    fn page_payload(results: Vec<Value>) -> Value {
        json!({"response": {"status": "ok", "results": results}})
    }

    fn requested_page(request: &crate::http::HttpRequest) -> u32 {
        request
            .query_value("page")
            .and_then(|page| page.parse().ok())
            .expect("page parameter")
    }

    #[test]
    fn test_search_sends_key_and_search_window_parameters() {
        let transport = ScriptedTransport::new(|_| Ok(page_payload(Vec::new())));
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        let articles = client.search_articles("Moise Kisling").expect("search");
        assert!(articles.is_empty());

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.endpoint, format!("{BASE_URL}/search"));
        assert_eq!(request.query_value("q"), Some("\"Moise Kisling\" artist"));
        assert_eq!(request.query_value("api-key"), Some("sample-key"));
        assert_eq!(request.query_value("from-date"), Some("1900-01-01"));
        assert_eq!(request.query_value("to-date"), Some("2025-01-01"));
        assert_eq!(request.query_value("show-fields"), Some("trailText,body"));
        assert_eq!(request.query_value("page-size"), Some("50"));
        assert_eq!(request.query_value("page"), Some("1"));
        assert_eq!(request.query_value("order-by"), Some("relevance"));
        assert_eq!(request.query_value("section"), Some("culture"));
    }

    #[test]
    fn test_search_stops_paging_after_empty_page() {
        let transport = ScriptedTransport::new(|request| match requested_page(request) {
            1 => Ok(page_payload(vec![article_json("a1", "Monet", "")])),
            _ => Ok(page_payload(Vec::new())),
        });
        let options = GuardianSearchOptions {
            max_pages: 5,
            ..GuardianSearchOptions::default()
        };
        let client = GuardianClient::new(&transport, BASE_URL, "sample-key", options);

        let articles = client.search_articles("Monet").expect("search");
        assert_eq!(articles.len(), 1);
        let pages: Vec<u32> = transport.requests().iter().map(requested_page).collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_search_respects_max_pages_and_keeps_order() {
        let transport = ScriptedTransport::new(|request| {
            let page = requested_page(request);
            Ok(page_payload(vec![article_json(
                &format!("p{page}"),
                "Monet",
                "",
            )]))
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        let articles = client.search_articles("Monet").expect("search");
        let ids: Vec<Option<&str>> = articles.iter().map(|article| article.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("p1"), Some("p2")]);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.query_value("api-key"), Some("sample-key"));
        }
    }

    #[test]
    fn test_rejected_later_page_keeps_articles_already_fetched() {
        let transport = ScriptedTransport::new(|request| match requested_page(request) {
            1 => Ok(page_payload(vec![article_json("a1", "Monet at the Tate", "")])),
            _ => Err("HTTP 400 from https://content.guardian.test/search".to_string()),
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        match client.lookup("Monet") {
            ArtistOutcome::Found(article) => assert_eq!(article.id.as_deref(), Some("a1")),
            other => panic!("expected an article, got {other:?}"),
        }
        let pages: Vec<u32> = transport.requests().iter().map(requested_page).collect();
        assert_eq!(pages, vec![1, 2]);
    }

    #[test]
    fn test_search_stops_on_unexpected_payload_shape() {
        let transport = ScriptedTransport::new(|_| {
            Ok(json!({"message": "Unauthorized"}))
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        assert!(client.search_articles("Monet").expect("search").is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_lookup_selects_first_relevant_article() {
        let transport = ScriptedTransport::new(|request| match requested_page(request) {
            1 => Ok(page_payload(vec![
                article_json("manet", "Olympia", "Manet scandalised Paris"),
                article_json("monet", "Water lilies", "<p>the late monet</p>"),
            ])),
            _ => Ok(page_payload(Vec::new())),
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        match client.lookup("Monet") {
            ArtistOutcome::Found(article) => {
                assert_eq!(article.id.as_deref(), Some("monet"));
                assert_eq!(article.title, "Water lilies");
                assert_eq!(article.section_name, "Art and design");
            }
            other => panic!("expected an article, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_without_mentions_is_not_found() {
        let transport = ScriptedTransport::new(|request| match requested_page(request) {
            1 => Ok(page_payload(vec![article_json("manet", "Olympia", "Manet")])),
            _ => Ok(page_payload(Vec::new())),
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        assert_eq!(client.lookup("Monet"), ArtistOutcome::NotFound);
    }

    #[test]
    fn test_lookup_request_failure_becomes_failed_outcome() {
        let transport = ScriptedTransport::new(|_| {
            Err("HTTP 429 from https://content.guardian.test/search".to_string())
        });
        let client = GuardianClient::new(
            &transport,
            BASE_URL,
            "sample-key",
            GuardianSearchOptions::default(),
        );

        assert_eq!(
            client.lookup("Monet"),
            ArtistOutcome::Failed(
                "Guardian search failed (page 1): HTTP 429 from https://content.guardian.test/search"
                    .to_string()
            )
        );
    }
}
