use serde_json::Value;
use thiserror::Error;

/// Failures that abort a fetch.
///
/// A non-200 status is not one of them: it comes back as
/// [`Outcome::Failure`](crate::model::Outcome::Failure).
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, connect or body read failure.
    #[error("Request to WeatherAPI.com failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The success body was not JSON, or a field had an unexpected type.
    #[error("Failed to decode WeatherAPI.com response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the response is documented to carry was absent. `raw` is the
    /// decoded body, so callers can still show what did arrive.
    #[error("WeatherAPI.com response is missing field `{field}`")]
    MissingField { field: &'static str, raw: Box<Value> },
}

impl ApiError {
    pub(crate) fn missing(field: &'static str, raw: &Value) -> Self {
        Self::MissingField { field, raw: Box::new(raw.clone()) }
    }

    /// The decoded success body, when the failure happened after decoding.
    pub fn raw_body(&self) -> Option<&Value> {
        match self {
            Self::MissingField { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
