//! Request/response types for the backend REST contract

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dashboard::DashboardBundle;

// ============================================
// Auth
// ============================================

/// Email/password pair sent to `/signup` and `/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    #[serde(default)]
    pub user_id: Option<WireId>,
}

/// User id as the backend sends it (integer primary key or string)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

// ============================================
// Cities
// ============================================

#[derive(Debug, Deserialize)]
pub(crate) struct CitiesResponse {
    #[serde(default)]
    pub cities: Vec<String>,
}

// ============================================
// Chat
// ============================================

/// Reply language understood by the chat endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Te,
    Hi,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Te => "te",
            Lang::Hi => "hi",
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Lang::En),
            "te" | "telugu" => Ok(Lang::Te),
            "hi" | "hindi" => Ok(Lang::Hi),
            other => Err(format!("Unsupported language: {}. Use: en, te, hi", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub lang: Lang,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
}

// ============================================
// Feedback / Rating
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub feedback: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingRequest {
    pub rating: u8,
    pub user_id: Option<String>,
}

/// `{message}` acknowledgement returned by feedback and rating
#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// Report
// ============================================

/// Query parameters for `/download_report`
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub city: String,
    pub pm25: f64,
    pub co: f64,
    pub no2: f64,
    pub aqi: f64,
}

impl ReportQuery {
    /// Encode as a query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        format!(
            "city={}&pm25={}&co={}&no2={}&aqi={}",
            urlencoding::encode(&self.city),
            self.pm25,
            self.co,
            self.no2,
            self.aqi
        )
    }
}

impl From<&DashboardBundle> for ReportQuery {
    fn from(bundle: &DashboardBundle) -> Self {
        Self {
            city: bundle.city.clone(),
            pm25: bundle.pm25,
            co: bundle.co,
            no2: bundle.no2,
            aqi: bundle.now,
        }
    }
}
