use std::fmt;

use reqwest::{StatusCode, header::HeaderMap};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::ApiError;

/// Location in any format the API accepts: `48.8567,2.3508`, `Paris`,
/// `10001`, `metar:EGLL`, `iata:DXB`, `auto:ip`, `100.0.0.1`, `id:2801268`.
///
/// Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationQuery(String);

impl LocationQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationQuery {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The HTTP exchange as received: status, headers and body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Result of one fetch. `http` is returned on both paths.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub http: RawResponse,
    pub outcome: Outcome<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Status 200: the decoded body and the fields read from it.
    Success { raw: Value, data: T },
    /// Any other status. The body was not parsed; see [`RawResponse::body`].
    Failure,
}

impl<T> Reply<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Success { data, .. } => Some(data),
            Outcome::Failure => None,
        }
    }
}

/// Fields read from a `current.json` response.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    /// As received; `21.55` stays `21.55`.
    pub temp_c: Number,
    pub condition_text: String,
    /// Present only when the response carried an `air_quality` object.
    /// An explicit `"index": null` is kept as `Value::Null`.
    pub air_quality_index: Option<Value>,
}

/// Fields read from an `alerts.json` response.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertsReport {
    pub location_name: String,
    /// Alert records in response order, shape not inspected.
    pub alerts: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: Option<Number>,
    condition: Option<WaCondition>,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: Option<WaLocation>,
    current: Option<WaCurrent>,
    air_quality: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct WaAlerts {
    alert: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct WaAlertsResponse {
    location: Option<WaLocation>,
    alerts: Option<WaAlerts>,
}

fn location_name(location: Option<WaLocation>, raw: &Value) -> Result<String, ApiError> {
    location.and_then(|l| l.name).ok_or_else(|| ApiError::missing("location.name", raw))
}

impl TryFrom<&Value> for CurrentConditions {
    type Error = ApiError;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        let parsed = WaCurrentResponse::deserialize(raw)?;

        let location_name = location_name(parsed.location, raw)?;
        let current = parsed.current.ok_or_else(|| ApiError::missing("current.temp_c", raw))?;
        let temp_c = current.temp_c.ok_or_else(|| ApiError::missing("current.temp_c", raw))?;
        let condition_text = current
            .condition
            .and_then(|c| c.text)
            .ok_or_else(|| ApiError::missing("current.condition.text", raw))?;

        // `air_quality` without `index` is treated like the other required fields.
        let air_quality_index = parsed
            .air_quality
            .map(|mut aq| {
                aq.remove("index").ok_or_else(|| ApiError::missing("air_quality.index", raw))
            })
            .transpose()?;

        Ok(Self { location_name, temp_c, condition_text, air_quality_index })
    }
}

impl TryFrom<&Value> for AlertsReport {
    type Error = ApiError;

    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        let parsed = WaAlertsResponse::deserialize(raw)?;

        let location_name = location_name(parsed.location, raw)?;
        let alerts = parsed
            .alerts
            .and_then(|a| a.alert)
            .ok_or_else(|| ApiError::missing("alerts.alert", raw))?;

        Ok(Self { location_name, alerts })
    }
}
