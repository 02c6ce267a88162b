//! AirAware Backend Client
//!
//! Typed access to the backend REST contract.
//!
//! ## Endpoints
//!
//! - `POST /signup`, `POST /login` - exchange credentials for a user id
//! - `GET /cities` - tracked city names
//! - `GET /dashboard_data?city=` - one [`DashboardBundle`]
//! - `GET /download_report` - PDF report for a bundle
//! - `POST /chat` - air-quality assistant
//! - `POST /feedback`, `POST /rate` - user feedback
//!
//! [`Backend`] is the seam the dashboard controller and the form
//! handlers depend on; [`HttpBackend`] is the reqwest implementation.

mod dto;
mod error;
mod http;

pub use dto::{ChatRequest, Credentials, FeedbackRequest, Lang, RatingRequest, ReportQuery};
pub use error::{ClientError, ClientResult};
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::dashboard::DashboardBundle;

/// Operations offered by the AirAware backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Create an account, returning the new session token
    async fn signup(&self, credentials: &Credentials) -> ClientResult<String>;

    /// Log in, returning the session token
    async fn login(&self, credentials: &Credentials) -> ClientResult<String>;

    /// Tracked city names, in backend order
    async fn cities(&self) -> ClientResult<Vec<String>>;

    /// Fetch and validate the dashboard bundle for one city
    async fn dashboard_data(&self, city: &str) -> ClientResult<DashboardBundle>;

    /// Ask the assistant; `None` when the backend sent no reply
    async fn chat(&self, request: &ChatRequest) -> ClientResult<Option<String>>;

    /// Store free-text feedback
    async fn feedback(&self, request: &FeedbackRequest) -> ClientResult<Option<String>>;

    /// Store a 1-5 star rating
    async fn rate(&self, request: &RatingRequest) -> ClientResult<Option<String>>;

    /// Absolute URL of the report for `query`
    fn report_url(&self, query: &ReportQuery) -> String;

    /// Download the generated report
    async fn download_report(&self, query: &ReportQuery) -> ClientResult<Vec<u8>>;
}
