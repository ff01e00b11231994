//! API error response body parsing.
//!
//! The TaskFlow backend (Django REST Framework) reports errors in a few
//! shapes:
//! - Detail:      `{"detail": "Invalid token."}`
//! - Flat:        `{"message": "..."}`
//! - Field map:   `{"username": ["This field is required."]}`
//!
//! Anything else falls back to the raw body text.

use serde_json::Value;

/// Extract a human-readable message from an API error response body.
///
/// Tries the known JSON error shapes in order of specificity, falling back
/// to `HTTP {status}: {body}` if nothing matches.
pub fn parse_api_error(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        // DRF detail: {"detail": "..."} — preferred over "message"
        if let Some(msg) = json["detail"].as_str().or_else(|| json["message"].as_str()) {
            return msg.to_string();
        }

        // Serializer field errors: {"field": ["msg", ...], ...}
        if let Some(msg) = first_field_error(&json) {
            return msg;
        }
    }

    // Not JSON, or valid JSON with no recognizable shape
    format!("HTTP {status}: {body}")
}

/// Extract the first serializer field error from a DRF error map.
///
/// `{"username": ["This field is required."]}` → `"username: This field is
/// required."`. `non_field_errors` entries are reported without the field
/// prefix.
fn first_field_error(json: &Value) -> Option<String> {
    let map = json.as_object()?;
    for (field, value) in map {
        let first = match value {
            Value::Array(items) => items.first().and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        if let Some(msg) = first {
            if field == "non_field_errors" {
                return Some(msg.to_string());
            }
            return Some(format!("{field}: {msg}"));
        }
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
