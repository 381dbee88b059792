// Response envelope of the hotel partner API and normalization of its error shapes.
// Every endpoint answers `{ success, message, data, errors }`. Field errors come
// in three flavours depending on the backend version:
//   - `data.errors: [{field, message}]`
//   - `errors: [{field, message}]`
//   - `errors: {field: "msg" | ["msg", ...]}`

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

// Field name -> messages, in the shape forms consume them.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldErrorEntry {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawErrors {
    List(Vec<FieldErrorEntry>),
    Record(BTreeMap<String, OneOrMany>),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Value,
}

// Decoded body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl Envelope {
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    // Unknown shapes are treated as "no errors" rather than failing the whole body.
    fn raw_errors(&self) -> Option<RawErrors> {
        if self.errors.is_null() {
            return None;
        }
        serde_json::from_value(self.errors.clone()).ok()
    }

    // `data.errors` takes precedence over the top-level field.
    fn nested_errors(&self) -> Option<Vec<FieldErrorEntry>> {
        let nested = self.data.get("errors")?;
        serde_json::from_value::<Vec<FieldErrorEntry>>(nested.clone()).ok()
    }

    pub fn field_errors(&self) -> FieldErrors {
        let mut normalized = FieldErrors::new();

        if let Some(entries) = self.nested_errors() {
            collect_entries(&mut normalized, entries);
            return normalized;
        }

        match self.raw_errors() {
            Some(RawErrors::List(entries)) => collect_entries(&mut normalized, entries),
            Some(RawErrors::Record(record)) => {
                for (field, value) in record {
                    let messages = match value {
                        OneOrMany::One(msg) => vec![msg],
                        OneOrMany::Many(msgs) => msgs,
                    };
                    normalized.insert(field, messages);
                }
            }
            None => {}
        }

        normalized
    }

    // First specific error message, falling back to the envelope message.
    pub fn first_error_message(&self, fallback: Option<&str>) -> String {
        let from_list = self
            .nested_errors()
            .or_else(|| match self.raw_errors() {
                Some(RawErrors::List(entries)) => Some(entries),
                _ => None,
            })
            .and_then(|entries| entries.into_iter().next())
            .map(|entry| entry.message)
            .filter(|msg| !msg.is_empty());

        from_list
            .or_else(|| self.message.clone().filter(|m| !m.is_empty()))
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
    }

    pub fn into_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, serde_json::Error> {
        let data = serde_json::from_value(self.data)?;
        Ok(ApiResponse {
            success: self.success.unwrap_or(true),
            message: self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "ok".to_string()),
            data,
        })
    }
}

// Entries without a field or message are dropped; the last message per field wins.
fn collect_entries(into: &mut FieldErrors, entries: Vec<FieldErrorEntry>) {
    for entry in entries {
        if !entry.field.is_empty() && !entry.message.is_empty() {
            into.insert(entry.field, vec![entry.message]);
        }
    }
}

// Message shown when the server answered without a usable body.
pub fn status_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 => "Authentication required. Please log in.",
        403 => "Access forbidden. You don't have permission to access this resource.",
        404 => "Resource not found.",
        s if s >= 500 => "Server error. Please try again later.",
        _ => "Request failed. Please try again.",
    }
}
