//! Health Advisory
//!
//! Maps an AQI reading to one of four fixed health-guidance tiers.
//! Upper bounds are inclusive, so a reading sitting exactly on a
//! boundary belongs to the lower tier (50 is Good, 150 is Unhealthy).

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Upper bound (inclusive) of the Good tier
pub const GOOD_MAX: f64 = 50.0;
/// Upper bound (inclusive) of the Moderate tier
pub const MODERATE_MAX: f64 = 100.0;
/// Upper bound (inclusive) of the Unhealthy tier
pub const UNHEALTHY_MAX: f64 = 150.0;

/// Health-guidance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTier {
    Good,
    Moderate,
    /// Unhealthy for sensitive groups (children and elders)
    Unhealthy,
    VeryUnhealthy,
}

impl AdvisoryTier {
    /// All tiers, lowest first
    pub const ALL: [AdvisoryTier; 4] = [
        AdvisoryTier::Good,
        AdvisoryTier::Moderate,
        AdvisoryTier::Unhealthy,
        AdvisoryTier::VeryUnhealthy,
    ];

    /// Classify an AQI reading.
    ///
    /// Any ordered value is accepted, including negatives and infinities.
    /// NaN has no place on the ladder and is rejected.
    pub fn for_aqi(aqi: f64) -> Result<Self, AdvisoryError> {
        if aqi.is_nan() {
            return Err(AdvisoryError::NotANumber);
        }

        let tier = if aqi <= GOOD_MAX {
            AdvisoryTier::Good
        } else if aqi <= MODERATE_MAX {
            AdvisoryTier::Moderate
        } else if aqi <= UNHEALTHY_MAX {
            AdvisoryTier::Unhealthy
        } else {
            AdvisoryTier::VeryUnhealthy
        };

        Ok(tier)
    }

    /// Short label used in tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            AdvisoryTier::Good => "Good",
            AdvisoryTier::Moderate => "Moderate",
            AdvisoryTier::Unhealthy => "Unhealthy for sensitive groups",
            AdvisoryTier::VeryUnhealthy => "Very unhealthy",
        }
    }

    /// Guidance text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            AdvisoryTier::Good => "Air is Good — Safe for outdoor activity.",
            AdvisoryTier::Moderate => "Air is Moderate — Sensitive people should be careful.",
            AdvisoryTier::Unhealthy => {
                "Unhealthy for children & elders — Avoid long outdoor activity."
            }
            AdvisoryTier::VeryUnhealthy => {
                "Very Unhealthy — Wear mask, avoid jogging & stay indoors."
            }
        }
    }

    /// Severity color (hex)
    pub fn color(&self) -> &'static str {
        match self {
            AdvisoryTier::Good => "#16a34a",
            AdvisoryTier::Moderate => "#ca8a04",
            AdvisoryTier::Unhealthy => "#ea580c",
            AdvisoryTier::VeryUnhealthy => "#dc2626",
        }
    }
}

impl fmt::Display for AdvisoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified advisory: message plus severity color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub aqi: f64,
    pub tier: AdvisoryTier,
    pub message: &'static str,
    pub color: &'static str,
}

/// Classify an AQI reading into an [`Advisory`]
pub fn classify(aqi: f64) -> Result<Advisory, AdvisoryError> {
    let tier = AdvisoryTier::for_aqi(aqi)?;
    Ok(Advisory {
        aqi,
        tier,
        message: tier.message(),
        color: tier.color(),
    })
}

/// Errors raised by the classifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("AQI value is not a number")]
    NotANumber,
}
