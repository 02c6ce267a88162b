//! Dashboard View
//!
//! In-memory state of every widget. The controller owns one view and
//! applies each refresh's updates to it; renderers can replay it.

use serde::Serialize;

use super::widgets::{
    AqiStats, Composition, Gauge, HourlySeries, PollutantReadout, PredictionBars, TrendSeries,
    WidgetUpdate,
};
use crate::advisory::Advisory;
use crate::render::Renderer;

/// Currently displayed widget values (`None` until the first refresh)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub pollutants: Option<PollutantReadout>,
    pub headline: Option<f64>,
    pub stats: Option<AqiStats>,
    pub gauge: Option<Gauge>,
    pub predictions: Option<PredictionBars>,
    pub composition: Option<Composition>,
    pub hourly: Option<HourlySeries>,
    pub trend: Option<TrendSeries>,
    pub advisory: Option<Advisory>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// True before any refresh has been applied
    pub fn is_empty(&self) -> bool {
        self.headline.is_none()
    }

    /// Apply a single widget update
    pub fn apply(&mut self, update: &WidgetUpdate) {
        match update {
            WidgetUpdate::Pollutants(p) => self.pollutants = Some(p.clone()),
            WidgetUpdate::Headline(aqi) => self.headline = Some(*aqi),
            WidgetUpdate::Stats(s) => self.stats = Some(*s),
            WidgetUpdate::Gauge(g) => {
                // Old gauge is dropped before the new one takes its place
                if let Some(old) = self.gauge.take() {
                    tracing::trace!(value = old.value, "Gauge destroyed");
                }
                self.gauge = Some(g.clone());
            }
            WidgetUpdate::Predictions(p) => self.predictions = Some(*p),
            WidgetUpdate::Composition(c) => self.composition = Some(*c),
            WidgetUpdate::Hourly(h) => self.hourly = Some(h.clone()),
            WidgetUpdate::Trend(t) => self.trend = Some(t.clone()),
            WidgetUpdate::Advisory(a) => self.advisory = Some(a.clone()),
        }
    }

    /// Current contents as updates, in refresh order
    pub fn updates(&self) -> Vec<WidgetUpdate> {
        let mut updates = Vec::with_capacity(9);
        if let Some(p) = &self.pollutants {
            updates.push(WidgetUpdate::Pollutants(p.clone()));
        }
        if let Some(aqi) = self.headline {
            updates.push(WidgetUpdate::Headline(aqi));
        }
        if let Some(s) = self.stats {
            updates.push(WidgetUpdate::Stats(s));
        }
        if let Some(g) = &self.gauge {
            updates.push(WidgetUpdate::Gauge(g.clone()));
        }
        if let Some(p) = self.predictions {
            updates.push(WidgetUpdate::Predictions(p));
        }
        if let Some(c) = self.composition {
            updates.push(WidgetUpdate::Composition(c));
        }
        if let Some(h) = &self.hourly {
            updates.push(WidgetUpdate::Hourly(h.clone()));
        }
        if let Some(t) = &self.trend {
            updates.push(WidgetUpdate::Trend(t.clone()));
        }
        if let Some(a) = &self.advisory {
            updates.push(WidgetUpdate::Advisory(a.clone()));
        }
        updates
    }

    /// Push the whole view through a renderer
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        for update in self.updates() {
            renderer.render(&update);
        }
    }
}

impl Renderer for DashboardView {
    fn render(&mut self, update: &WidgetUpdate) {
        self.apply(update);
    }
}
