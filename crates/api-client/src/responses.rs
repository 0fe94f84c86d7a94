use reqwest::StatusCode;
use serde_json::Value;

/// A response body as the client saw it, before it is matched to a DTO.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The server declared JSON. `None` when the payload would not parse.
    Json(Option<Value>),
    Text(String),
}

impl ResponseBody {
    /// Classifies a raw body using the response's `Content-Type`.
    pub fn from_raw(content_type: Option<&str>, text: String) -> Self {
        match content_type {
            Some(ct) if ct.contains("application/json") => {
                ResponseBody::Json(serde_json::from_str(&text).ok())
            }
            _ => ResponseBody::Text(text),
        }
    }
}

/// Picks the message for a failed request, most specific first: the `error`
/// field of a JSON object, a non-empty plain-text body, then a generic message
/// carrying the status code.
pub fn error_message(status: StatusCode, body: &ResponseBody) -> String {
    match body {
        ResponseBody::Json(Some(Value::Object(map))) if map.contains_key("error") => {
            match &map["error"] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }
        }
        ResponseBody::Text(text) if !text.is_empty() => text.clone(),
        _ => format!("Request failed: {}", status.as_u16()),
    }
}
