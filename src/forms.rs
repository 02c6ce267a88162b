//! Form Handlers
//!
//! Authentication, city search, report, chat, feedback and rating.
//! Empty input is rejected before any request is made. Errors reported
//! by the backend come back verbatim as [`FormError::Rejected`]; transport
//! and parse failures carry a fixed notice per form.

use serde::Serialize;
use thiserror::Error;

use crate::app::{App, View};
use crate::client::{
    ChatRequest, ClientError, Credentials, FeedbackRequest, Lang, RatingRequest, ReportQuery,
};
use crate::dashboard::{RefreshError, RefreshOutcome};
use crate::session::SessionError;

pub const LOGGED_OUT: &str = "Logged out.";
pub const NO_REPLY: &str = "No reply.";
pub const SAVED: &str = "Saved";

/// Star rating picked by the user, cleared once sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSelection {
    stars: Option<u8>,
}

impl RatingSelection {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, stars: u8) -> FormResult<()> {
        if !(Self::MIN..=Self::MAX).contains(&stars) {
            return Err(FormError::InvalidRating(stars));
        }
        self.stars = Some(stars);
        Ok(())
    }

    pub fn stars(&self) -> Option<u8> {
        self.stars
    }

    pub fn clear(&mut self) {
        self.stars = None;
    }
}

/// Report location for the last displayed bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLink {
    pub city: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy)]
enum AuthMode {
    Signup,
    Login,
}

impl AuthMode {
    fn failed_notice(self) -> &'static str {
        match self {
            AuthMode::Signup => "Signup failed",
            AuthMode::Login => "Login failed",
        }
    }
}

impl App {
    /// Create an account and enter the dashboard
    pub async fn signup(&self, email: &str, password: &str) -> FormResult<View> {
        self.authenticate(AuthMode::Signup, email, password).await
    }

    /// Log in and enter the dashboard
    pub async fn login(&self, email: &str, password: &str) -> FormResult<View> {
        self.authenticate(AuthMode::Login, email, password).await
    }

    async fn authenticate(&self, mode: AuthMode, email: &str, password: &str) -> FormResult<View> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(FormError::MissingCredentials);
        }

        let credentials = Credentials::new(email, password);
        let result = match mode {
            AuthMode::Signup => self.backend.signup(&credentials).await,
            AuthMode::Login => self.backend.login(&credentials).await,
        };

        let token = result.map_err(|e| match e {
            ClientError::Status { .. } => failure(e, mode.failed_notice()),
            other => failure(other, "Server error."),
        })?;

        self.session.store_token(&token)?;
        tracing::info!(?mode, "Authenticated");

        Ok(self.bootstrap().await?)
    }

    /// Drop the session; the next bootstrap shows the authentication view
    pub fn logout(&self) -> FormResult<&'static str> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(LOGGED_OUT)
    }

    /// Refresh the dashboard for a typed-in city
    pub async fn search_city(&self, city: &str) -> Result<RefreshOutcome, RefreshError> {
        self.dashboard().refresh(city).await
    }

    /// Report link for the bundle currently on screen
    pub async fn report_link(&self) -> FormResult<ReportLink> {
        let query = self.report_query().await?;
        Ok(ReportLink {
            url: self.backend.report_url(&query),
            city: query.city,
        })
    }

    /// Download the report for the bundle currently on screen
    pub async fn download_report(&self) -> FormResult<(ReportQuery, Vec<u8>)> {
        let query = self.report_query().await?;
        let bytes = self
            .backend
            .download_report(&query)
            .await
            .map_err(|e| failure(e, "Report download failed."))?;
        Ok((query, bytes))
    }

    async fn report_query(&self) -> FormResult<ReportQuery> {
        let bundle = self
            .dashboard()
            .last_bundle()
            .await
            .ok_or(FormError::NoReport)?;
        Ok(ReportQuery::from(bundle.as_ref()))
    }

    /// Ask the assistant. Blank messages are ignored (`Ok(None)`).
    pub async fn chat(&self, message: &str, lang: Lang) -> FormResult<Option<String>> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(None);
        }

        let request = ChatRequest {
            message: message.to_string(),
            lang,
        };
        let reply = self
            .backend
            .chat(&request)
            .await
            .map_err(|e| failure(e, "Could not connect."))?;

        Ok(Some(reply.unwrap_or_else(|| NO_REPLY.to_string())))
    }

    /// Send free-text feedback tagged with the current session
    pub async fn send_feedback(&self, feedback: &str) -> FormResult<String> {
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(FormError::EmptyFeedback);
        }

        let request = FeedbackRequest {
            feedback: feedback.to_string(),
            user_id: self.session.token()?,
        };
        let message = self
            .backend
            .feedback(&request)
            .await
            .map_err(|e| failure(e, "Error sending feedback."))?;

        Ok(message.unwrap_or_else(|| SAVED.to_string()))
    }

    /// Send the selected rating. Nothing is sent without a selection.
    pub async fn submit_rating(&self, selection: &mut RatingSelection) -> FormResult<String> {
        let rating = selection.stars().ok_or(FormError::NoRating)?;

        let request = RatingRequest {
            rating,
            user_id: self.session.token()?,
        };
        let message = self
            .backend
            .rate(&request)
            .await
            .map_err(|e| failure(e, "Error saving rating."))?;

        selection.clear();
        Ok(message.unwrap_or_else(|| SAVED.to_string()))
    }
}

fn failure(err: ClientError, notice: &'static str) -> FormError {
    match err {
        ClientError::Backend(message) => FormError::Rejected(message),
        other => {
            tracing::error!(error = %other, notice, "Request failed");
            FormError::Failed {
                notice,
                source: other,
            }
        }
    }
}

/// Form errors; `Display` is the text shown to the user
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Enter email & password")]
    MissingCredentials,

    #[error("Write feedback first.")]
    EmptyFeedback,

    #[error("Select rating first.")]
    NoRating,

    #[error("Rating must be 1 to 5.")]
    InvalidRating(u8),

    #[error("Predict AQI first.")]
    NoReport,

    /// Error text from the backend
    #[error("{0}")]
    Rejected(String),

    #[error("{notice}")]
    Failed {
        notice: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),
}

impl FormError {
    /// Raised locally, before any request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FormError::MissingCredentials
                | FormError::EmptyFeedback
                | FormError::NoRating
                | FormError::InvalidRating(_)
                | FormError::NoReport
        )
    }
}

pub type FormResult<T> = Result<T, FormError>;
