//! Request construction and signing
//!
//! Public calls are plain GET requests with the parameters in the query
//! string. Private calls are POSTed as JSON and carry `apiKey`, `nonce` and
//! `signature` fields. The signature is the HMAC of a canonical message:
//!
//! ```text
//! <url>,apiKey=<key>,nonce=<nonce>,<param1>=<value1>,<param2>=<value2>,...
//! ```
//!
//! Parameters appear in the order the caller added them, formatted exactly as
//! [`ParamValue`]'s `Display` renders them. The exchange rebuilds the same
//! string and rejects any signature that does not match byte for byte.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use ir_auth::{Credentials, NonceSource};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{RestError, RestResult};

/// Default exchange host
pub const DEFAULT_BASE_URL: &str = "https://api.independentreserve.com";

/// User agent sent with private requests
pub const DEFAULT_USER_AGENT: &str = "Independent Reserve Javascript API Client";

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A single request parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Bool(bool),
    /// Rendered comma-separated in the canonical message, as an array in JSON
    List(Vec<String>),
}

impl ParamValue {
    /// JSON representation used in private request bodies
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Integer(n) => Value::from(*n),
            // Number keeps the exact text, so the body matches the signed message
            Self::Decimal(d) => {
                let text = d.normalize().to_string();
                text.parse::<serde_json::Number>()
                    .map(Value::Number)
                    .unwrap_or(Value::String(text))
            }
            Self::Bool(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Decimal(d) => write!(f, "{}", d.normalize()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::List(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(format_timestamp(&value))
    }
}

/// Format a timestamp as ISO-8601 UTC with millisecond precision
///
/// e.g. `2024-01-02T03:04:05.000Z`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Ordered request parameters
///
/// Insertion order is preserved because it determines the canonical message.
/// Setting a key that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Add a parameter only if a value is present
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Add or replace a parameter
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Query string pairs for public requests
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// Build the canonical message signed for a private request
pub fn canonical_message(url: &str, api_key: &str, nonce: u64, params: &Params) -> String {
    let mut segments = Vec::with_capacity(params.len() + 3);
    segments.push(url.to_string());
    segments.push(format!("apiKey={}", api_key));
    segments.push(format!("nonce={}", nonce));
    for (key, value) in params.iter() {
        segments.push(format!("{}={}", key, value));
    }
    segments.join(",")
}

/// A fully built request, ready for dispatch
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Endpoint action, e.g. `GetMarketSummary`
    pub action: String,
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    /// Caller parameters, in order
    pub params: Params,
    /// Nonce consumed by this request (private only)
    pub nonce: Option<u64>,
    /// Uppercase hex signature (private only)
    pub signature: Option<String>,
    /// JSON body (private only)
    pub body: Option<Map<String, Value>>,
    pub timeout: Duration,
}

impl SignedRequest {
    /// Short description used in error messages and logs
    pub fn description(&self) -> String {
        match self.nonce {
            Some(nonce) => format!("{} {} with nonce {}", self.method, self.url, nonce),
            None => format!("{} {}", self.method, self.url),
        }
    }
}

/// Builds public and signed private requests for one client
///
/// Owns the client's nonce counter, so every client instance signs with its
/// own strictly increasing sequence.
#[derive(Debug)]
pub struct RequestBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    nonces: NonceSource,
    user_agent: String,
    timeout: Duration,
}

impl RequestBuilder {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<Credentials>,
        nonces: NonceSource,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            nonces,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// The nonce the next private build will consume
    pub fn next_nonce(&self) -> u64 {
        self.nonces.peek()
    }

    /// Build an unauthenticated GET request
    pub fn build_public(&self, action: &str, params: Params) -> SignedRequest {
        let url = format!("{}/Public/{}", self.base_url, action);

        SignedRequest {
            action: action.to_string(),
            url,
            method: HttpMethod::Get,
            headers: vec![("User-Agent".to_string(), self.user_agent.clone())],
            params,
            nonce: None,
            signature: None,
            body: None,
            timeout: self.timeout,
        }
    }

    /// Build a signed POST request
    ///
    /// Consumes exactly one nonce, whether or not the request is sent.
    ///
    /// # Errors
    /// [`RestError::Configuration`] if the client has no credentials. No
    /// nonce is consumed in that case.
    pub fn build_private(&self, action: &str, params: Params) -> RestResult<SignedRequest> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            RestError::Configuration(format!(
                "API key and secret are required to call {}",
                action
            ))
        })?;

        let url = format!("{}/Private/{}", self.base_url, action);
        let nonce = self.nonces.next();
        let message = canonical_message(&url, credentials.api_key(), nonce, &params);
        let signature = credentials.sign(&message);

        let mut body = Map::new();
        body.insert("apiKey".to_string(), Value::String(credentials.api_key().to_string()));
        body.insert("nonce".to_string(), Value::from(nonce));
        body.insert("signature".to_string(), Value::String(signature.clone()));
        for (key, value) in params.iter() {
            body.insert(key.to_string(), value.to_json());
        }

        debug!(action, nonce, "Signed private request");

        Ok(SignedRequest {
            action: action.to_string(),
            url,
            method: HttpMethod::Post,
            headers: vec![("User-Agent".to_string(), self.user_agent.clone())],
            params,
            nonce: Some(nonce),
            signature: Some(signature),
            body: Some(body),
            timeout: self.timeout,
        })
    }
}
