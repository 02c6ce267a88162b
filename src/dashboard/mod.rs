//! Dashboard
//!
//! Everything between a city name and the widgets on screen.
//!
//! ## Architecture
//!
//! - **Bundle**: typed, validated `/dashboard_data` response
//! - **Widgets**: pure derivation of each widget from a bundle
//! - **View**: current widget values
//! - **Controller**: refresh sequencing and stale-response handling
//! - **Bootstrap**: city directory used on startup
//!
//! ## Refresh Order
//!
//! pollutants → headline AQI → min/max stats → gauge → prediction bars →
//! composition → hourly series → trend → advisory

mod bootstrap;
mod bundle;
mod controller;
mod view;
mod widgets;

pub use bootstrap::{default_cities, fallback_slots, load_directory, CityDirectory, CITY_SLOTS, DEFAULT_CITIES};
pub use bundle::{BundleError, DashboardBundle, HOURLY_POINTS};
pub use controller::{
    DashboardController, DashboardState, RefreshError, RefreshOutcome, PREDICTION_FAILED,
};
pub use view::DashboardView;
pub use widgets::{
    plan_updates, AqiStats, Composition, Gauge, HourlySeries, PollutantReadout, PredictionBars,
    TrendSeries, WidgetKind, WidgetUpdate, GAUGE_SCALE, UPDATE_ORDER,
};

#[cfg(test)]
pub(crate) use bundle::fixtures;
