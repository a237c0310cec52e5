//! HTTP transport adapter
//!
//! Executes a [`SignedRequest`] with `reqwest` and reduces the outcome to an
//! [`Exchange`]: either a transport failure, or a status line plus an
//! optional [`ResponseBody`]. Nothing from `reqwest` escapes this module.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::request::{HttpMethod, SignedRequest};

/// Body of a completed response
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body parsed as a JSON object or array
    Parsed(Value),
    /// Raw text that is not structured JSON, typically an HTML error page
    Unparsed(String),
}

impl ResponseBody {
    /// Interpret raw response text
    ///
    /// Returns `None` for an empty body or a JSON `null`. Only top-level
    /// objects and arrays count as structured data; anything else is kept as
    /// raw text.
    pub fn from_text(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(text) {
            Ok(Value::Null) => None,
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(Self::Parsed(value)),
            _ => Some(Self::Unparsed(text.to_string())),
        }
    }
}

/// A request that failed before a response was received
#[derive(Debug)]
pub struct TransportFailure {
    /// Short code naming the failure, e.g. `timeout` or `connect`
    pub code: String,
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportFailure {
    pub fn new(
        code: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            code: code.into(),
            source: source.into(),
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "timeout"
        } else if err.is_connect() {
            "connect"
        } else if err.is_redirect() {
            "redirect"
        } else if err.is_builder() {
            "builder"
        } else if err.is_body() {
            "body"
        } else if err.is_decode() {
            "decode"
        } else {
            "request"
        };
        Self::new(code, err)
    }
}

/// Outcome of one HTTP exchange
#[derive(Debug)]
pub enum Exchange {
    /// The request did not complete
    Failed(TransportFailure),
    /// A response was received
    Completed {
        status: u16,
        status_text: String,
        body: Option<ResponseBody>,
    },
}

impl Exchange {
    /// Shorthand for a completed exchange
    pub fn completed(status: u16, status_text: impl Into<String>, body: Option<ResponseBody>) -> Self {
        Self::Completed {
            status,
            status_text: status_text.into(),
            body,
        }
    }
}

/// Send a request and collect the exchange
pub(crate) async fn execute(http: &Client, request: &SignedRequest) -> Exchange {
    let mut builder = match request.method {
        HttpMethod::Get if request.params.is_empty() => http.get(&request.url),
        HttpMethod::Get => http.get(&request.url).query(&request.params.to_query()),
        HttpMethod::Post => {
            let builder = http.post(&request.url);
            match &request.body {
                Some(body) => builder.json(body),
                None => builder,
            }
        }
    };

    builder = builder
        .header("Accept", "application/json")
        .timeout(request.timeout);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    debug!("Sending {}", request.description());

    let response = match builder.send().await {
        Ok(response) => response,
        Err(err) => return Exchange::Failed(TransportFailure::from_reqwest(err)),
    };

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();

    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => return Exchange::Failed(TransportFailure::from_reqwest(err)),
    };

    debug!(status = status.as_u16(), bytes = text.len(), "Received response");

    Exchange::Completed {
        status: status.as_u16(),
        status_text,
        body: ResponseBody::from_text(&text),
    }
}
