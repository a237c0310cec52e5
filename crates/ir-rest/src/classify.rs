//! Response classification
//!
//! Every exchange, public or private, goes through [`classify`]. Checks run
//! in a fixed order and the first match wins:
//!
//! 1. transport failure
//! 2. non-2xx status
//! 3. `WithdrawDigitalCurrency` succeeds without a body
//! 4. missing body
//! 5. `Message` field reported by the exchange
//! 6. body that is not structured JSON (HTML error pages)
//! 7. success

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::error::{RestError, RestResult};
use crate::transport::{Exchange, ResponseBody};

/// Action whose successful response has no body
pub const WITHDRAW_DIGITAL_CURRENCY: &str = "WithdrawDigitalCurrency";

/// Classify a completed or failed exchange
///
/// `description` names the request (method and URL) for error messages.
/// Returns `Ok(None)` only for a successful withdrawal.
pub fn classify(action: &str, description: &str, exchange: Exchange) -> RestResult<Option<Value>> {
    let result = classify_inner(action, description, exchange);
    if let Err(err) = &result {
        warn!(action, kind = ?err.kind(), "{}", err);
    }
    result
}

fn classify_inner(action: &str, description: &str, exchange: Exchange) -> RestResult<Option<Value>> {
    let (status, status_text, body) = match exchange {
        Exchange::Failed(failure) => {
            return Err(RestError::Transport {
                action: action.to_string(),
                description: description.to_string(),
                code: failure.code,
                source: failure.source,
            })
        }
        Exchange::Completed {
            status,
            status_text,
            body,
        } => (status, status_text, body),
    };

    if !(200..300).contains(&status) {
        return Err(RestError::Http {
            action: action.to_string(),
            description: description.to_string(),
            status,
            status_text,
        });
    }

    if action == WITHDRAW_DIGITAL_CURRENCY {
        return Ok(None);
    }

    let body = body.ok_or_else(|| RestError::EmptyResponse {
        action: action.to_string(),
        description: description.to_string(),
    })?;

    match body {
        ResponseBody::Parsed(value) => {
            if let Some(message) = exchange_message(&value) {
                return Err(RestError::Application {
                    action: action.to_string(),
                    message,
                });
            }
            Ok(Some(value))
        }
        ResponseBody::Unparsed(raw) => {
            let detail = match extract_body_text(&raw) {
                Some(text) => format!("Response body text: {}", text),
                None => "No text could be extracted from the response body.".to_string(),
            };
            Err(RestError::UnparsableResponse {
                action: action.to_string(),
                description: description.to_string(),
                detail,
            })
        }
    }
}

/// The `Message` field of an error reported inside a 2xx response
fn exchange_message(value: &Value) -> Option<String> {
    match value.get("Message")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex is valid"))
}

/// Extract the human-readable text of an HTML page's `<body>`
///
/// Falls back to the whole document when there is no `<body>` element.
/// Scripts, styles, comments and tags are dropped, common entities decoded
/// and whitespace collapsed. Returns `None` if no text remains.
pub fn extract_body_text(html: &str) -> Option<String> {
    static BODY: OnceLock<Regex> = OnceLock::new();
    static HIDDEN: OnceLock<Regex> = OnceLock::new();
    static COMMENT: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let body = regex(&BODY, r"(?is)<body\b[^>]*>(.*?)(?:</body\s*>|$)")
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str());

    let text = regex(&HIDDEN, r"(?is)<(?:script|style|head)\b[^>]*>.*?</(?:script|style|head)\s*>")
        .replace_all(body, " ");
    let text = regex(&COMMENT, r"(?s)<!--.*?-->").replace_all(&text, " ");
    let text = regex(&TAG, r"(?s)<[^>]*>").replace_all(&text, " ");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
