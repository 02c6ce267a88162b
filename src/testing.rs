//! In-process backend for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{
    Backend, ChatRequest, ClientError, ClientResult, Credentials, FeedbackRequest, RatingRequest,
    ReportQuery,
};
use crate::dashboard::DashboardBundle;

/// Scriptable [`Backend`] that records every call
#[derive(Default)]
pub struct FakeBackend {
    bundles: HashMap<String, DashboardBundle>,
    delays: HashMap<String, Duration>,
    cities: Vec<String>,
    users: Mutex<HashMap<String, (String, String)>>,
    chat_reply: Option<String>,
    unavailable: bool,
    cities_unavailable: bool,
    calls: Mutex<HashMap<&'static str, usize>>,
    pub feedback_sent: Mutex<Vec<FeedbackRequest>>,
    pub ratings_sent: Mutex<Vec<RatingRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            chat_reply: Some("Wear a mask outdoors.".to_string()),
            ..Default::default()
        }
    }

    pub fn with_bundle(mut self, bundle: DashboardBundle) -> Self {
        self.bundles.insert(bundle.city.clone(), bundle);
        self
    }

    pub fn with_delay(mut self, city: &str, delay: Duration) -> Self {
        self.delays.insert(city.to_string(), delay);
        self
    }

    pub fn with_cities(mut self, cities: &[&str]) -> Self {
        self.cities = cities.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_user(self, email: &str, password: &str, id: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), id.to_string()));
        self
    }

    pub fn with_chat_reply(mut self, reply: Option<&str>) -> Self {
        self.chat_reply = reply.map(str::to_string);
        self
    }

    /// Every call fails as if the server were down
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Only `/cities` fails
    pub fn unavailable_cities(mut self) -> Self {
        self.cities_unavailable = true;
        self
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, endpoint: &'static str) -> ClientResult<()> {
        *self.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
        if self.unavailable {
            Err(ClientError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn signup(&self, credentials: &Credentials) -> ClientResult<String> {
        self.record("signup")?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&credentials.email) {
            return Err(ClientError::Backend(
                "User already exists. Please login.".to_string(),
            ));
        }
        let id = (users.len() + 1).to_string();
        users.insert(
            credentials.email.clone(),
            (credentials.password.clone(), id.clone()),
        );
        Ok(id)
    }

    async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        self.record("login")?;
        let users = self.users.lock().unwrap();
        match users.get(&credentials.email) {
            None => Err(ClientError::Backend(
                "Email is not registered. Please sign up.".to_string(),
            )),
            Some((password, _)) if *password != credentials.password => {
                Err(ClientError::Backend("Wrong password.".to_string()))
            }
            Some((_, id)) => Ok(id.clone()),
        }
    }

    async fn cities(&self) -> ClientResult<Vec<String>> {
        self.record("cities")?;
        if self.cities_unavailable {
            return Err(ClientError::Unavailable);
        }
        Ok(self.cities.clone())
    }

    async fn dashboard_data(&self, city: &str) -> ClientResult<DashboardBundle> {
        self.record("dashboard_data")?;
        if let Some(delay) = self.delays.get(city) {
            tokio::time::sleep(*delay).await;
        }
        self.bundles
            .get(city)
            .cloned()
            .ok_or_else(|| ClientError::Backend(format!("No data for city {}", city)))
    }

    async fn chat(&self, _request: &ChatRequest) -> ClientResult<Option<String>> {
        self.record("chat")?;
        Ok(self.chat_reply.clone())
    }

    async fn feedback(&self, request: &FeedbackRequest) -> ClientResult<Option<String>> {
        self.record("feedback")?;
        self.feedback_sent.lock().unwrap().push(request.clone());
        Ok(Some("Feedback stored".to_string()))
    }

    async fn rate(&self, request: &RatingRequest) -> ClientResult<Option<String>> {
        self.record("rate")?;
        self.ratings_sent.lock().unwrap().push(request.clone());
        Ok(Some(format!("Rating {}★ stored", request.rating)))
    }

    fn report_url(&self, query: &ReportQuery) -> String {
        format!("http://fake/download_report?{}", query.to_query_string())
    }

    async fn download_report(&self, _query: &ReportQuery) -> ClientResult<Vec<u8>> {
        self.record("download_report")?;
        Ok(b"%PDF-1.4 fake".to_vec())
    }
}
