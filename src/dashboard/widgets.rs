//! Widget models
//!
//! Each dashboard widget is a plain value derived from a bundle. A refresh
//! produces one [`WidgetUpdate`] per widget, always in [`UPDATE_ORDER`].

use serde::Serialize;

use super::bundle::{DashboardBundle, HOURLY_POINTS};
use crate::advisory::{classify, Advisory, AdvisoryError};

/// Full scale of the AQI gauge
pub const GAUGE_SCALE: f64 = 500.0;
/// Gauge turns red above this value
pub const GAUGE_ALERT_ABOVE: f64 = 150.0;

const GAUGE_COLOR: &str = "#06b6d4";
const GAUGE_ALERT_COLOR: &str = "#ef4444";

/// Widget identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Pollutants,
    Headline,
    Stats,
    Gauge,
    Predictions,
    Composition,
    Hourly,
    Trend,
    Advisory,
}

/// Order in which a refresh touches the widgets
pub const UPDATE_ORDER: [WidgetKind; 9] = [
    WidgetKind::Pollutants,
    WidgetKind::Headline,
    WidgetKind::Stats,
    WidgetKind::Gauge,
    WidgetKind::Predictions,
    WidgetKind::Composition,
    WidgetKind::Hourly,
    WidgetKind::Trend,
    WidgetKind::Advisory,
];

/// City name and raw pollutant levels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantReadout {
    pub city: String,
    pub pm25: f64,
    pub co: f64,
    pub no2: f64,
}

/// Min / current / max AQI stat numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AqiStats {
    pub min: f64,
    pub now: f64,
    pub max: f64,
}

/// Doughnut gauge. Recreated from scratch on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    /// Remainder of the scale (`500 - value`)
    pub remaining: f64,
    pub color: &'static str,
}

impl Gauge {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            remaining: GAUGE_SCALE - value,
            color: if value > GAUGE_ALERT_ABOVE {
                GAUGE_ALERT_COLOR
            } else {
                GAUGE_COLOR
            },
        }
    }
}

/// Now / 1 year / 5 years bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionBars {
    pub now: f64,
    pub one_year: f64,
    pub five_year: f64,
}

impl PredictionBars {
    pub const LABELS: [&'static str; 3] = ["Now", "1 Year", "5 Years"];

    pub fn values(&self) -> [f64; 3] {
        [self.now, self.one_year, self.five_year]
    }
}

/// Pollutant composition slices. PM10 and CO slices are estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Composition {
    pub pm25: f64,
    pub pm10: f64,
    pub co: f64,
}

impl Composition {
    pub const LABELS: [&'static str; 3] = ["PM2.5", "PM10", "CO"];

    /// PM2.5 as reported, PM10 ≈ 40% of PM2.5 (at least 10), CO proxy = 10×CO (at least 5)
    pub fn from_levels(pm25: f64, co: f64) -> Self {
        Self {
            pm25,
            pm10: round_half_up(pm25 * 0.4).max(10.0),
            co: round_half_up(co * 10.0).max(5.0),
        }
    }

    pub fn values(&self) -> [f64; 3] {
        [self.pm25, self.pm10, self.co]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

/// Halves round toward positive infinity
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// 24-point hourly AQI line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries {
    pub values: Vec<f64>,
}

impl HourlySeries {
    /// `0:00` .. `23:00`
    pub fn labels() -> Vec<String> {
        (0..HOURLY_POINTS).map(|h| format!("{}:00", h)).collect()
    }
}

/// Multi-year AQI trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub years: Vec<String>,
    pub values: Vec<f64>,
}

/// One widget's new content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", content = "data", rename_all = "snake_case")]
pub enum WidgetUpdate {
    Pollutants(PollutantReadout),
    Headline(f64),
    Stats(AqiStats),
    Gauge(Gauge),
    Predictions(PredictionBars),
    Composition(Composition),
    Hourly(HourlySeries),
    Trend(TrendSeries),
    Advisory(Advisory),
}

impl WidgetUpdate {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetUpdate::Pollutants(_) => WidgetKind::Pollutants,
            WidgetUpdate::Headline(_) => WidgetKind::Headline,
            WidgetUpdate::Stats(_) => WidgetKind::Stats,
            WidgetUpdate::Gauge(_) => WidgetKind::Gauge,
            WidgetUpdate::Predictions(_) => WidgetKind::Predictions,
            WidgetUpdate::Composition(_) => WidgetKind::Composition,
            WidgetUpdate::Hourly(_) => WidgetKind::Hourly,
            WidgetUpdate::Trend(_) => WidgetKind::Trend,
            WidgetUpdate::Advisory(_) => WidgetKind::Advisory,
        }
    }
}

/// Derive every widget update from one bundle, in [`UPDATE_ORDER`].
///
/// Pure: nothing is displayed until the whole plan exists, so a bad value
/// cannot leave the dashboard half-updated.
pub fn plan_updates(bundle: &DashboardBundle) -> Result<Vec<WidgetUpdate>, AdvisoryError> {
    let aqi = bundle.now;
    let advisory = classify(aqi)?;

    Ok(vec![
        WidgetUpdate::Pollutants(PollutantReadout {
            city: bundle.city.clone(),
            pm25: bundle.pm25,
            co: bundle.co,
            no2: bundle.no2,
        }),
        WidgetUpdate::Headline(aqi),
        WidgetUpdate::Stats(AqiStats {
            min: bundle.min_aqi,
            now: aqi,
            max: bundle.max_aqi,
        }),
        WidgetUpdate::Gauge(Gauge::new(aqi)),
        WidgetUpdate::Predictions(PredictionBars {
            now: aqi,
            one_year: bundle.y1,
            five_year: bundle.y5,
        }),
        WidgetUpdate::Composition(Composition::from_levels(bundle.pm25, bundle.co)),
        WidgetUpdate::Hourly(HourlySeries {
            values: bundle.hourly.clone(),
        }),
        WidgetUpdate::Trend(TrendSeries {
            years: bundle.years.clone(),
            values: bundle.trend.clone(),
        }),
        WidgetUpdate::Advisory(advisory),
    ])
}
