//! Dashboard Bundle
//!
//! The complete per-city snapshot returned by `/dashboard_data`. Every
//! widget is derived from exactly one bundle, so the whole response is
//! parsed and validated before anything is displayed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Number of points in the hourly series
pub const HOURLY_POINTS: usize = 24;

/// Per-city air-quality snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBundle {
    pub city: String,
    pub pm25: f64,
    pub co: f64,
    pub no2: f64,
    /// Current (predicted) AQI, the headline number
    pub now: f64,
    pub min_aqi: f64,
    pub max_aqi: f64,
    /// One-year projection
    pub y1: f64,
    /// Five-year projection
    pub y5: f64,
    pub hourly: Vec<f64>,
    /// Trend labels; the backend sends years as strings but numbers are accepted
    #[serde(deserialize_with = "labels")]
    pub years: Vec<String>,
    pub trend: Vec<f64>,
}

impl DashboardBundle {
    /// Parse a JSON response body into a validated bundle
    pub fn from_json(body: Value) -> Result<Self, BundleError> {
        if let Some(message) = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            return Err(BundleError::Reported(message.to_string()));
        }

        let bundle: DashboardBundle =
            serde_json::from_value(body).map_err(|e| BundleError::Schema(e.to_string()))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Check the invariants serde cannot express
    pub fn validate(&self) -> Result<(), BundleError> {
        let scalars = [
            ("pm25", self.pm25),
            ("co", self.co),
            ("no2", self.no2),
            ("now", self.now),
            ("min_aqi", self.min_aqi),
            ("max_aqi", self.max_aqi),
            ("y1", self.y1),
            ("y5", self.y5),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(BundleError::NonFinite(field.to_string()));
            }
        }

        if self.hourly.len() != HOURLY_POINTS {
            return Err(BundleError::HourlyLength(self.hourly.len()));
        }
        if self.hourly.iter().any(|v| !v.is_finite()) {
            return Err(BundleError::NonFinite("hourly".to_string()));
        }

        if self.years.len() != self.trend.len() {
            return Err(BundleError::TrendMismatch {
                years: self.years.len(),
                values: self.trend.len(),
            });
        }
        if self.trend.iter().any(|v| !v.is_finite()) {
            return Err(BundleError::NonFinite("trend".to_string()));
        }

        Ok(())
    }
}

fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Int(i64),
        Float(f64),
    }

    let raw = Vec::<Label>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|label| match label {
            Label::Text(s) => s,
            Label::Int(n) => n.to_string(),
            Label::Float(f) => f.to_string(),
        })
        .collect())
}

/// Errors raised while turning a response into a bundle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BundleError {
    /// Body carried a non-empty `error` field
    #[error("{0}")]
    Reported(String),

    #[error("bundle does not match schema: {0}")]
    Schema(String),

    #[error("field {0} is not a finite number")]
    NonFinite(String),

    #[error("hourly series has {0} points, expected 24")]
    HourlyLength(usize),

    #[error("trend has {years} labels but {values} values")]
    TrendMismatch { years: usize, values: usize },
}
