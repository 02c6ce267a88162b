//! # AirAware
//!
//! Client for the AirAware air-quality backend: authentication, per-city
//! AQI dashboards, health advisories, and feedback forms.
//!
//! ## Features
//!
//! - **Typed backend contract**: every response is parsed and validated
//! - **Consistent dashboard**: all widgets come from one bundle at a time
//! - **Stale-safe refresh**: overlapping refreshes never show older data
//! - **Durable session**: token kept on disk between runs
//!
//! ## Modules
//!
//! - [`advisory`]: AQI → health advisory classifier
//! - [`client`]: REST client for the backend
//! - [`dashboard`]: bundle, widgets and the refresh controller
//! - [`session`]: session token storage
//! - [`forms`]: auth, chat, feedback, rating and report actions
//! - [`render`]: renderer trait and terminal renderer
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airaware::{App, Config, FileSessionStore, HttpBackend, View};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(HttpBackend::new(&config.backend)?);
//!     let store = Arc::new(FileSessionStore::new(&config.session.path));
//!     let app = App::new(backend, store);
//!
//!     match app.login("me@example.com", "secret").await? {
//!         View::Dashboard(boot) => println!("Tracking {:?}", boot.directory.cities()),
//!         View::Auth => println!("Please log in"),
//!     }
//!
//!     let view = app.dashboard().view().await;
//!     println!("AQI now: {:?}", view.headline);
//!     Ok(())
//! }
//! ```

pub mod advisory;
pub mod app;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod forms;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export top-level types for convenience
pub use advisory::{classify, Advisory, AdvisoryError, AdvisoryTier};

pub use app::{App, DashboardBoot, View};

pub use client::{
    Backend, ChatRequest, ClientError, ClientResult, Credentials, FeedbackRequest, HttpBackend,
    Lang, RatingRequest, ReportQuery,
};

pub use config::{Config, ConfigError, LoggingConfig};

pub use dashboard::{
    BundleError, CityDirectory, DashboardBundle, DashboardController, DashboardState,
    DashboardView, RefreshError, RefreshOutcome, WidgetKind, WidgetUpdate,
};

pub use forms::{FormError, FormResult, RatingSelection, ReportLink};

pub use render::{Renderer, TerminalRenderer};

pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionError, SessionResult, SessionStore,
};
