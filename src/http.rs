//! Blocking JSON-over-HTTP transport shared by the enrichment backends.

use std::io::Read;
use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::config::HttpConfig;

const USER_AGENT: &str = "artist-enrichment/0.1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// One outbound request: endpoint without query, plus query and header pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(endpoint)
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first header named `key` (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Full URL with percent-encoded query string.
    pub fn url(&self) -> String {
        let mut url = self.endpoint.clone();
        if self.query.is_empty() {
            return url;
        }

        url.push('?');
        for (index, (key, value)) in self.query.iter().enumerate() {
            if index > 0 {
                url.push('&');
            }
            url.push_str(urlencoding::encode(key).as_ref());
            url.push('=');
            url.push_str(urlencoding::encode(value).as_ref());
        }
        url
    }
}

/// Sends a request and returns its parsed JSON body.
pub trait JsonTransport {
    fn send_json(&self, request: &HttpRequest) -> Result<Value, String>;
}

impl<T: JsonTransport + ?Sized> JsonTransport for &T {
    fn send_json(&self, request: &HttpRequest) -> Result<Value, String> {
        (**self).send_json(request)
    }
}

/// Transport backed by a shared `ureq` agent.
pub struct UreqTransport {
    http_client: ureq::Agent,
}

impl UreqTransport {
    pub fn new(config: &HttpConfig) -> Self {
        let read_timeout = Duration::from_secs(config.read_timeout_secs);
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(config.connect_timeout_secs))
            .timeout_read(read_timeout)
            .timeout_write(read_timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { http_client }
    }

    fn describe_failure(endpoint: &str, error: &ureq::Error) -> String {
        match error {
            ureq::Error::Status(code, _) => format!("HTTP {code} from {endpoint}"),
            ureq::Error::Transport(transport) => match transport.message() {
                Some(message) => format!(
                    "request to {endpoint} failed: {}: {message}",
                    transport.kind()
                ),
                None => format!("request to {endpoint} failed: {}", transport.kind()),
            },
        }
    }
}

impl JsonTransport for UreqTransport {
    fn send_json(&self, request: &HttpRequest) -> Result<Value, String> {
        // Query strings carry API keys; only the bare endpoint is logged.
        debug!("{} {}", request.method.as_str(), request.endpoint);
        let mut pending = self
            .http_client
            .request(request.method.as_str(), &request.url());
        for (key, value) in &request.headers {
            pending = pending.set(key, value);
        }
        let response = pending
            .call()
            .map_err(|error| Self::describe_failure(&request.endpoint, &error))?;

        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|error| format!("Failed to read response: {error}"))?;
        parse_json_body(&body)
    }
}

/// Parses a response body, reporting a short prefix of anything that is not JSON.
pub fn parse_json_body(body: &str) -> Result<Value, String> {
    let trimmed = body.trim();
    serde_json::from_str::<Value>(trimmed).map_err(|error| {
        let snippet: String = trimmed.chars().take(120).collect();
        format!("Invalid JSON response: {error}; prefix={snippet}")
    })
}

/// Reads a string field, treating JSON null, non-strings and blanks as absent.
pub fn optional_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use serde_json::Value;

    use super::{HttpRequest, JsonTransport};

    type Responder = Box<dyn Fn(&HttpRequest) -> Result<Value, String>>;

    /// In-memory transport that records requests and answers from a closure.
    pub(crate) struct ScriptedTransport {
        responder: Responder,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(
            responder: impl Fn(&HttpRequest) -> Result<Value, String> + 'static,
        ) -> Self {
            Self {
                responder: Box::new(responder),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    impl JsonTransport for ScriptedTransport {
        fn send_json(&self, request: &HttpRequest) -> Result<Value, String> {
            self.requests.borrow_mut().push(request.clone());
            (self.responder)(request)
        }
    }
}
