//! Dashboard Controller
//!
//! Owns the dashboard state and runs the refresh sequence:
//! fetch one bundle, plan every widget update from it, then apply the
//! plan under the state lock and remember the bundle for report download.
//!
//! Refreshes may overlap (two city buttons pressed quickly). Each one
//! takes a generation number; a response older than what is already on
//! screen is discarded instead of overwriting newer data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use super::bundle::DashboardBundle;
use super::view::DashboardView;
use super::widgets::{plan_updates, WidgetUpdate};
use crate::advisory::AdvisoryError;
use crate::client::{Backend, ClientError};

/// Generic notice shown for transport and parse failures
pub const PREDICTION_FAILED: &str = "Prediction error.";

/// State shared between refreshes
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub view: DashboardView,
    /// Bundle behind the current view; read-only, used for reports
    pub last_bundle: Option<Arc<DashboardBundle>>,
    /// Generation of the refresh that produced the current view
    pub applied_generation: u64,
}

/// Result of a successful refresh
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub generation: u64,
    pub bundle: Arc<DashboardBundle>,
    /// Updates applied, in order
    pub updates: Vec<WidgetUpdate>,
}

/// Runs dashboard refreshes against a backend
pub struct DashboardController {
    backend: Arc<dyn Backend>,
    state: RwLock<DashboardState>,
    next_generation: AtomicU64,
}

impl DashboardController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: RwLock::new(DashboardState::default()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Refresh every widget from the bundle for `city`.
    ///
    /// On any error the view and the last bundle are left untouched.
    pub async fn refresh(&self, city: &str) -> Result<RefreshOutcome, RefreshError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(RefreshError::EmptyCity);
        }

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(city, generation, "Refreshing dashboard");

        let bundle = match self.backend.dashboard_data(city).await {
            Ok(bundle) => bundle,
            Err(ClientError::Backend(message)) => {
                tracing::warn!(city, generation, error = %message, "Backend rejected refresh");
                return Err(RefreshError::Backend(message));
            }
            Err(e) => {
                tracing::error!(city, generation, error = %e, "Dashboard fetch failed");
                return Err(RefreshError::Failed(e));
            }
        };

        let updates = plan_updates(&bundle)?;
        let bundle = Arc::new(bundle);

        let mut state = self.state.write().await;
        if generation < state.applied_generation {
            tracing::warn!(
                city,
                generation,
                applied = state.applied_generation,
                "Discarding stale dashboard response"
            );
            return Err(RefreshError::Superseded {
                generation,
                applied: state.applied_generation,
            });
        }

        for update in &updates {
            state.view.apply(update);
        }
        state.last_bundle = Some(Arc::clone(&bundle));
        state.applied_generation = generation;
        drop(state);

        tracing::info!(
            city = %bundle.city,
            generation,
            aqi = bundle.now,
            "Dashboard updated"
        );

        Ok(RefreshOutcome {
            generation,
            bundle,
            updates,
        })
    }

    /// Copy of the currently displayed widgets
    pub async fn view(&self) -> DashboardView {
        self.state.read().await.view.clone()
    }

    /// Bundle behind the current view, if any refresh has succeeded
    pub async fn last_bundle(&self) -> Option<Arc<DashboardBundle>> {
        self.state.read().await.last_bundle.clone()
    }

    /// Snapshot of the whole state
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Most recently issued generation
    pub fn latest_generation(&self) -> u64 {
        self.next_generation.load(Ordering::SeqCst)
    }
}

/// Ways a refresh can fail
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("Enter a city name.")]
    EmptyCity,

    /// Error reported by the backend, shown verbatim
    #[error("{0}")]
    Backend(String),

    #[error("{}", PREDICTION_FAILED)]
    Failed(#[source] ClientError),

    #[error("{}", PREDICTION_FAILED)]
    InvalidAqi(#[from] AdvisoryError),

    /// A newer refresh was already displayed
    #[error("Refresh {generation} superseded by {applied}")]
    Superseded { generation: u64, applied: u64 },
}
