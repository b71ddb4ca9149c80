//! HTTP client for the same-origin proxy.
//!
//! Everything the portal pages send leaves through here: the inscription
//! submission, the catalogue fetch and the user directory lookup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::auth::User;
use crate::benefits::{BenefitContext, BenefitType, BenefitsData};
use crate::form::InscriptionForm;

/// How long a user directory lookup stays fresh.
const USER_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Fallback shown when a rejection carries no message of its own.
pub const FALLBACK_MESSAGE: &str =
    "Error al procesar la inscripción. Por favor intenta nuevamente.";

/// Why a submission attempt did not go through. Both kinds are terminal for
/// the attempt; the distinction tells the caller whether retrying by hand
/// can make sense at all.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The server answered, and said no.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// No response reached us at all.
    #[error("Error al procesar la inscripción. Por favor intenta nuevamente.")]
    Network(#[from] reqwest::Error),
}

/// Why a catalogue or directory fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API error: {status}")]
    Status { status: u16 },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Upstream acknowledgement of an accepted inscription.
#[derive(Debug, Clone)]
pub struct Ack {
    pub status: u16,
    pub body: Value,
}

/// The flattened wire payload of `POST /api/inscription`.
///
/// Optional fields serialize as explicit `null`, never get omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionRequest {
    pub student_id: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
    pub benefit_id: String,
    pub phone_number: String,
    pub preferred_times: Option<String>,
    pub level: Option<String>,
    pub notes: Option<String>,
    pub career: String,
}

impl InscriptionRequest {
    pub fn from_form(form: &InscriptionForm, benefit: &BenefitContext) -> Self {
        Self {
            student_id: form.personal.student_id.clone(),
            email: form.contact.email.clone(),
            name: form.personal.first_name.clone(),
            last_name: form.personal.last_name.clone(),
            benefit_type: benefit.benefit_type(),
            benefit_id: benefit.id().to_string(),
            phone_number: form.contact.phone.clone(),
            preferred_times: form.preferred_times(),
            level: form.level(),
            notes: form.extra_notes(),
            career: form.personal.career.clone(),
        }
    }
}

/// Client side of the proxy endpoints.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    user_cache: Mutex<HashMap<String, (User, Instant)>>,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Posts one inscription. Single attempt only.
    pub async fn submit(&self, request: &InscriptionRequest) -> Result<Ack, SubmissionError> {
        let response = self
            .http
            .post(format!("{}/api/inscription", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        if status.is_success() {
            debug!(status = status.as_u16(), "inscription accepted");
            return Ok(Ack {
                status: status.as_u16(),
                body,
            });
        }

        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn fetch_benefits(&self) -> Result<BenefitsData, FetchError> {
        let response = self
            .http
            .get(format!("{}/api/benefits", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Looks a member up by email, serving repeat lookups from the cache.
    pub async fn fetch_user(&self, email: &str) -> Result<User, FetchError> {
        if let Some(user) = self.cached_user(email) {
            debug!(email, "user served from cache");
            return Ok(user);
        }

        let response = self
            .http
            .get(format!("{}/api/user", self.base_url))
            .query(&[("email", email)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let user: User = response.json().await?;

        self.user_cache
            .lock()
            .unwrap()
            .insert(email.to_string(), (user.clone(), Instant::now()));

        Ok(user)
    }

    fn cached_user(&self, email: &str) -> Option<User> {
        let cache = self.user_cache.lock().unwrap();

        cache
            .get(email)
            .filter(|(_, fetched_at)| fetched_at.elapsed() < USER_CACHE_TTL)
            .map(|(user, _)| user.clone())
    }
}
