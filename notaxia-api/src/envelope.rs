//! Response envelope decoding.
//!
//! The API answers in two styles: `{ "data": ..., "message": ... }` or a bare
//! JSON value. Both are resolved here, once, so callers only ever see the
//! payload and an optional message.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// Body was an object with a non-null `data` field.
    Wrapped { data: T, message: Option<String> },
    /// Body had no usable `data` field; the whole body is the payload.
    Bare { body: T, message: Option<String> },
}

impl Envelope<Value> {
    /// Parses raw response bytes. Returns `None` when the body is not JSON.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Value>(bytes).ok().map(Self::from_value)
    }

    /// Splits a parsed body into payload and message.
    pub fn from_value(mut body: Value) -> Self {
        let message = body.get("message").and_then(message_text);
        match body.as_object_mut().and_then(|obj| obj.remove("data")) {
            Some(data) if !data.is_null() => Envelope::Wrapped { data, message },
            Some(data) => {
                // `data: null` falls back to the whole body; put the field back
                if let Some(obj) = body.as_object_mut() {
                    obj.insert("data".to_string(), data);
                }
                Envelope::Bare { body, message }
            }
            None => Envelope::Bare { body, message },
        }
    }

    /// Decodes the payload into `U`. A JSON `null` payload decodes to `None`.
    pub fn decode<U: DeserializeOwned>(self) -> (Result<Option<U>, serde_json::Error>, Option<String>) {
        let (payload, message) = self.into_parts();
        if payload.is_null() {
            return (Ok(None), message);
        }
        (serde_json::from_value(payload).map(Some), message)
    }
}

impl<T> Envelope<T> {
    /// The effective payload.
    pub fn payload(&self) -> &T {
        match self {
            Envelope::Wrapped { data, .. } => data,
            Envelope::Bare { body, .. } => body,
        }
    }

    /// The server's `message`, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Wrapped { message, .. } | Envelope::Bare { message, .. } => {
                message.as_deref()
            }
        }
    }

    /// Returns `(payload, message)`.
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Envelope::Wrapped { data, message } => (data, message),
            Envelope::Bare { body, message } => (body, message),
        }
    }

    /// True if the body used the `{ data }` style.
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Envelope::Wrapped { .. })
    }
}

/// Validation errors arrive as a list of strings; join them.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
