//! Workout sync for completed matches.
//!
//! Finished matches can be logged as workouts with an external fitness
//! service. Sync is opportunistic: it runs after a match has been completed
//! and saved, and a failure is logged without affecting the match record.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ps_core::MatchRecord;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ACTIVITY_TYPE: &str = "padel";
const BRAND_NAME: &str = "Padel Tracker";

/// Workout sync errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The provided API key was invalid.
    #[error("invalid API key: {reason}")]
    InvalidApiKey { reason: &'static str },
    /// The endpoint URL was empty.
    #[error("sync endpoint cannot be empty")]
    MissingEndpoint,
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service refused the credentials.
    #[error("not authorized: {message}")]
    Unauthorized { message: String },
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// The match cannot be logged as a workout.
    #[error("match {id} is not complete")]
    IncompleteMatch { id: String },
}

/// A workout entry built from a completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub activity_type: String,
    pub brand: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_secs: f64,
    /// Estimated active energy in kilocalories.
    pub energy_kcal: f64,
}

impl Workout {
    /// Builds the workout for a completed match.
    pub fn from_record(record: &MatchRecord) -> Result<Self, SyncError> {
        let end = record.end_time().ok_or_else(|| SyncError::IncompleteMatch {
            id: record.id().to_string(),
        })?;
        let start = record.start_time();
        let duration_secs = end
            .signed_duration_since(start)
            .to_std()
            .map_or(0.0, |d| d.as_secs_f64());

        Ok(Self {
            activity_type: ACTIVITY_TYPE.to_string(),
            brand: BRAND_NAME.to_string(),
            start,
            end,
            duration_secs,
            energy_kcal: record.estimated_energy(),
        })
    }
}

/// External fitness service that can receive workouts.
#[async_trait]
pub trait WorkoutSync: Send + Sync {
    /// Asks the service for permission to write workouts.
    async fn request_authorization(&self) -> Result<(), SyncError>;

    async fn log_workout(&self, workout: &Workout) -> Result<(), SyncError>;
}

/// Logs a completed match as a workout, absorbing any failure.
///
/// Returns whether the workout was accepted.
pub async fn sync_completed_match<S: WorkoutSync + ?Sized>(sync: &S, record: &MatchRecord) -> bool {
    let workout = match Workout::from_record(record) {
        Ok(workout) => workout,
        Err(err) => {
            tracing::warn!(error = %err, "skipping workout sync");
            return false;
        }
    };

    match sync.log_workout(&workout).await {
        Ok(()) => {
            tracing::debug!(id = %record.id(), energy_kcal = workout.energy_kcal, "workout logged");
            true
        }
        Err(err) => {
            tracing::warn!(id = %record.id(), error = %err, "failed to save workout");
            false
        }
    }
}

/// HTTP client for the workout service.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or API key is empty, or if the HTTP
    /// client fails to build.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SyncError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SyncError::MissingEndpoint);
        }

        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SyncError::InvalidApiKey {
                reason: "API key cannot be empty",
            });
        }
        if api_key.trim().is_empty() {
            return Err(SyncError::InvalidApiKey {
                reason: "API key cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(SyncError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post<T: Serialize + Sync + ?Sized>(&self, path: &str, body: &T) -> Result<(), SyncError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        let message = parse_api_error(&body).unwrap_or_else(|| format!("status {status}: {body}"));
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            Err(SyncError::Unauthorized { message })
        } else {
            Err(SyncError::Api { message })
        }
    }
}

#[async_trait]
impl WorkoutSync for Client {
    async fn request_authorization(&self) -> Result<(), SyncError> {
        let scopes = AuthorizationRequest {
            share: &["workouts", "active_energy"],
        };
        self.post("/v1/authorize", &scopes).await
    }

    async fn log_workout(&self, workout: &Workout) -> Result<(), SyncError> {
        self.post("/v1/workouts", workout).await
    }
}

#[derive(Debug, Serialize)]
struct AuthorizationRequest {
    share: &'static [&'static str],
}

fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use ps_core::{GameScore, MatchLifecycleManager};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completed_record() -> MatchRecord {
        let start = Utc.with_ymd_and_hms(2025, 11, 16, 18, 0, 0).unwrap();
        let mut manager = MatchLifecycleManager::default();
        manager.start_new_match_at(start).unwrap();
        manager.update_active(GameScore { a: 6, b: 3 }, 3600.0);
        manager
            .complete_active_match_at(start + chrono::Duration::hours(1))
            .unwrap()
    }

    #[test]
    fn client_rejects_empty_api_key() {
        assert!(matches!(
            Client::new("http://localhost", ""),
            Err(SyncError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn client_rejects_whitespace_api_key() {
        assert!(matches!(
            Client::new("http://localhost", "   "),
            Err(SyncError::InvalidApiKey { .. })
        ));
    }

    #[test]
    fn client_rejects_empty_endpoint() {
        assert!(matches!(
            Client::new(" ", "key"),
            Err(SyncError::MissingEndpoint)
        ));
    }

    #[test]
    fn client_debug_redacts_api_key() {
        let client = Client::new("http://localhost", "secret-key").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn workout_from_completed_record() {
        let workout = Workout::from_record(&completed_record()).unwrap();
        assert_eq!(workout.activity_type, "padel");
        assert_eq!(workout.brand, "Padel Tracker");
        assert!((workout.duration_secs - 3600.0).abs() < f64::EPSILON);
        assert!((workout.energy_kcal - 500.0).abs() < 1e-9);
    }

    #[test]
    fn workout_requires_completed_record() {
        let mut manager = MatchLifecycleManager::default();
        let active = manager.start_new_match().unwrap().clone();
        assert!(matches!(
            Workout::from_record(&active),
            Err(SyncError::IncompleteMatch { .. })
        ));
    }

    #[test]
    fn parse_api_error_reads_message() {
        let body = r#"{"error":{"message":"token expired"}}"#;
        assert_eq!(parse_api_error(body).as_deref(), Some("token expired"));
        assert_eq!(parse_api_error("nope"), None);
    }

    #[tokio::test]
    async fn log_workout_posts_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/workouts"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "activity_type": "padel",
                "energy_kcal": 500.0
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), "test-key").unwrap();
        assert!(sync_completed_match(&client, &completed_record()).await);
    }

    #[tokio::test]
    async fn authorization_rejection_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/authorize"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": {"message": "bad token"}})),
            )
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), "test-key").unwrap();
        let err = client.request_authorization().await.unwrap_err();
        assert!(matches!(err, SyncError::Unauthorized { ref message } if message == "bad token"));
    }

    #[tokio::test]
    async fn failed_sync_is_absorbed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/workouts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = Client::new(server.uri(), "test-key").unwrap();
        assert!(!sync_completed_match(&client, &completed_record()).await);
    }
}
