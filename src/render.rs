//! Rendering
//!
//! The rendering layer receives widget updates one at a time, in refresh
//! order. [`TerminalRenderer`] draws a plain-text dashboard.

use std::fmt::Write;

use crate::dashboard::{
    Composition, Gauge, HourlySeries, PredictionBars, TrendSeries, WidgetUpdate, GAUGE_SCALE,
};

/// Receiver of widget updates
pub trait Renderer {
    fn render(&mut self, update: &WidgetUpdate);
}

const BAR_WIDTH: usize = 40;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Text renderer collecting output into a string
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    out: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn gauge(&mut self, gauge: &Gauge) {
        let filled = scaled(gauge.value, GAUGE_SCALE, BAR_WIDTH);
        let _ = writeln!(
            self.out,
            "Gauge   [{}{}] {:.0}/{:.0}",
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            gauge.value,
            GAUGE_SCALE
        );
    }

    fn predictions(&mut self, bars: &PredictionBars) {
        let _ = writeln!(self.out, "Forecast");
        let max = bars.values().iter().cloned().fold(1.0, f64::max);
        for (label, value) in PredictionBars::LABELS.iter().zip(bars.values()) {
            let _ = writeln!(
                self.out,
                "  {:<8} {:<width$} {:.0}",
                label,
                "█".repeat(scaled(value, max, BAR_WIDTH / 2)),
                value,
                width = BAR_WIDTH / 2
            );
        }
    }

    fn composition(&mut self, comp: &Composition) {
        let total = comp.total();
        let _ = write!(self.out, "Mix    ");
        for (label, value) in Composition::LABELS.iter().zip(comp.values()) {
            let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            let _ = write!(self.out, " {} {:.0}%", label, share);
        }
        let _ = writeln!(self.out);
    }

    fn hourly(&mut self, series: &HourlySeries) {
        let _ = writeln!(self.out, "Hourly  {}", sparkline(&series.values));
    }

    fn trend(&mut self, trend: &TrendSeries) {
        let _ = writeln!(self.out, "Trend");
        for (year, value) in trend.years.iter().zip(&trend.values) {
            let _ = writeln!(self.out, "  {:<6} {:.0}", year, value);
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, update: &WidgetUpdate) {
        match update {
            WidgetUpdate::Pollutants(p) => {
                let _ = writeln!(self.out, "{}", p.city);
                let _ = writeln!(
                    self.out,
                    "PM2.5 {}   CO {}   NO2 {}",
                    p.pm25, p.co, p.no2
                );
            }
            WidgetUpdate::Headline(aqi) => {
                let _ = writeln!(self.out, "AQI     {:.0}", aqi);
            }
            WidgetUpdate::Stats(s) => {
                let _ = writeln!(
                    self.out,
                    "Min {:.0}   Now {:.0}   Max {:.0}",
                    s.min, s.now, s.max
                );
            }
            WidgetUpdate::Gauge(g) => self.gauge(g),
            WidgetUpdate::Predictions(p) => self.predictions(p),
            WidgetUpdate::Composition(c) => self.composition(c),
            WidgetUpdate::Hourly(h) => self.hourly(h),
            WidgetUpdate::Trend(t) => self.trend(t),
            WidgetUpdate::Advisory(a) => {
                let _ = writeln!(self.out, "Advice  [{}] {}", a.tier, a.message);
            }
        }
    }
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / max).clamp(0.0, 1.0) * width as f64).round() as usize
}

/// One block character per value, scaled between the series min and max
pub fn sparkline(values: &[f64]) -> String {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span <= 0.0 {
                SPARKS[SPARKS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[idx.min(SPARKS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{fixtures, plan_updates};

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 7.0]), "▁█");
        assert_eq!(sparkline(&[5.0, 5.0, 5.0]), "▅▅▅");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_terminal_dashboard() {
        let mut renderer = TerminalRenderer::new();
        for update in plan_updates(&fixtures::bundle("Bengaluru", 80.0)).unwrap() {
            renderer.render(&update);
        }

        let out = renderer.into_string();
        assert!(out.starts_with("Bengaluru\n"));
        assert!(out.contains("AQI     80"));
        assert!(out.contains("Min 60   Now 80   Max 140"));
        assert!(out.contains("[Moderate] Air is Moderate"));
        assert!(out.contains("  2025   170"));
    }

    #[test]
    fn test_gauge_bar_width() {
        let mut renderer = TerminalRenderer::new();
        renderer.render(&WidgetUpdate::Gauge(Gauge::new(250.0)));
        let line = renderer.output().lines().next().unwrap();
        assert!(line.contains(&format!("[{}{}]", "#".repeat(20), ".".repeat(20))));
    }
}
