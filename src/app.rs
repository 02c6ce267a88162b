//! Application controller
//!
//! Owns the backend handle, the session and the dashboard controller.
//! Every user action goes through an [`App`]; there is no global state.

use std::sync::Arc;

use crate::client::Backend;
use crate::dashboard::{
    default_cities, fallback_slots, load_directory, CityDirectory, DashboardController,
    RefreshError, RefreshOutcome,
};
use crate::session::{Session, SessionResult, SessionStore};

/// What the user sees after startup or authentication
#[derive(Debug)]
pub enum View {
    /// No session token: show the login/signup form
    Auth,
    /// Logged in: dashboard with its city buttons
    Dashboard(DashboardBoot),
}

impl View {
    pub fn is_dashboard(&self) -> bool {
        matches!(self, View::Dashboard(_))
    }
}

/// Dashboard startup result
#[derive(Debug)]
pub struct DashboardBoot {
    pub directory: CityDirectory,
    /// Refresh of the first city; `None` if the directory is empty
    pub initial: Option<Result<RefreshOutcome, RefreshError>>,
}

/// AirAware client application
pub struct App {
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) session: Session,
    dashboard: DashboardController,
    fallback_cities: Vec<String>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            dashboard: DashboardController::new(Arc::clone(&backend)),
            backend,
            session: Session::new(store),
            fallback_cities: default_cities(),
        }
    }

    /// Override the cities used when the backend listing is short.
    /// Missing or blank entries keep the default city for that slot.
    pub fn with_fallback_cities(mut self, cities: Vec<String>) -> Self {
        self.fallback_cities = fallback_slots(&cities);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dashboard(&self) -> &DashboardController {
        &self.dashboard
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Decide the starting view.
    ///
    /// Without a token this is the authentication view. With one, the city
    /// directory is loaded and the first city refreshed automatically. A
    /// failed initial refresh is reported but still lands on the dashboard.
    pub async fn bootstrap(&self) -> SessionResult<View> {
        if self.session.token()?.is_none() {
            tracing::info!("No session, showing authentication view");
            return Ok(View::Auth);
        }

        let directory = load_directory(self.backend.as_ref(), &self.fallback_cities).await;

        let initial = match directory.first() {
            Some(city) => {
                let result = self.dashboard.refresh(city).await;
                if let Err(e) = &result {
                    tracing::warn!(city, error = %e, "Initial dashboard load failed");
                }
                Some(result)
            }
            None => None,
        };

        Ok(View::Dashboard(DashboardBoot { directory, initial }))
    }
}
