//! Tracking client for the collection endpoint
//!
//! The [`Tracker`] is the only active behavior in this crate. It assembles an
//! event envelope, attaches a session identifier, and issues a single POST to
//! the collection endpoint. Delivery is best-effort: no retry, no queueing,
//! and no failure ever reaches the caller. Transport failures, non-success
//! responses, and serialization failures are logged and swallowed, so
//! telemetry loss is invisible to the instrumented code path. That loss is an
//! accepted tradeoff; the one hard rule is that tracking must never interrupt
//! or fail the action it is instrumenting.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

use crate::config::TrackerConfig;
use crate::contracts::{EventType, Metadata};
use crate::error::{Error, Result};

use super::session::generate_session_id;

/// Fixed user identifier emitted until a real identity system is wired in
pub const PLACEHOLDER_USER_ID: &str = "current-user";

/// Supplies the identifier of the currently acting user
///
/// The tracker resolves the user per call through this seam so a real
/// auth/session lookup can replace the placeholder per environment or test.
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> String;
}

/// Identity provider returning the fixed [`PLACEHOLDER_USER_ID`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderIdentity;

impl IdentityProvider for PlaceholderIdentity {
    fn current_user_id(&self) -> String {
        PLACEHOLDER_USER_ID.to_string()
    }
}

/// Outbound payload for POST to the events path
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventEnvelope<'a> {
    event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Metadata>,
    user_id: &'a str,
    session_id: &'a str,
}

/// Fire-and-forget client for the analytics collection endpoint
///
/// Stateless across calls: every invocation builds an independent envelope,
/// and session identity persists only if the caller threads it through.
pub struct Tracker {
    http_client: reqwest::Client,
    /// Fully resolved events URL; None when delivery is disabled by config
    events_url: Option<String>,
    identity: Arc<dyn IdentityProvider>,
}

impl Tracker {
    /// Create a new tracker from configuration and an identity provider
    ///
    /// Returns an error if the configuration is invalid. A disabled config is
    /// valid; the resulting tracker skips delivery entirely.
    pub fn new(config: TrackerConfig, identity: Arc<dyn IdentityProvider>) -> Result<Self> {
        config.validate()?;

        let events_url = if config.enabled {
            let base = config
                .endpoint_url
                .as_deref()
                .ok_or_else(|| Error::Config("endpoint_url is required".to_string()))?
                .trim_end_matches('/');
            Some(format!("{}{}", base, config.events_path))
        } else {
            None
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            events_url,
            identity,
        })
    }

    /// Create a tracker using the fixed placeholder identity
    pub fn with_placeholder_identity(config: TrackerConfig) -> Result<Self> {
        Self::new(config, Arc::new(PlaceholderIdentity))
    }

    /// Track a single event
    ///
    /// Resolves the user from the identity provider, uses the supplied session
    /// id verbatim or mints a fresh one, and makes at most one delivery
    /// attempt. Never fails from the caller's perspective; the outcome is
    /// observed only for logging.
    pub async fn track_event(
        &self,
        kind: EventType,
        metadata: Option<Metadata>,
        session_id: Option<String>,
    ) {
        let events_url = match &self.events_url {
            Some(url) => url,
            None => {
                tracing::debug!(event_type = kind.as_str(), "Tracking disabled, event dropped");
                return;
            }
        };

        let user_id = self.identity.current_user_id();
        let session_id = session_id.unwrap_or_else(generate_session_id);

        let envelope = EventEnvelope {
            event_type: kind,
            metadata: metadata.as_ref(),
            user_id: &user_id,
            session_id: &session_id,
        };

        match self.deliver(events_url, &envelope).await {
            Ok(()) => {
                tracing::debug!(
                    event_type = kind.as_str(),
                    session_id = %session_id,
                    "Delivered analytics event"
                );
            }
            Err(e) => {
                tracing::warn!(
                    event_type = kind.as_str(),
                    session_id = %session_id,
                    error = %e,
                    "Failed to deliver analytics event"
                );
            }
        }
    }

    /// Send one envelope to the collection endpoint
    async fn deliver(&self, url: &str, envelope: &EventEnvelope<'_>) -> Result<()> {
        let response = self.http_client.post(url).json(envelope).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Endpoint {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Track a page view
    pub async fn track_page_view(&self, page: &str, metadata: Option<Metadata>) {
        let metadata = with_capture_fields(metadata, "page", page);
        self.track_event(EventType::PageView, Some(metadata), None)
            .await;
    }

    /// Track creation of a task
    pub async fn track_task_created(&self, task_id: &str, metadata: Option<Metadata>) {
        let metadata = with_capture_fields(metadata, "taskId", task_id);
        self.track_event(EventType::TaskCreated, Some(metadata), None)
            .await;
    }

    /// Track completion of a task
    pub async fn track_task_completed(&self, task_id: &str, metadata: Option<Metadata>) {
        let metadata = with_capture_fields(metadata, "taskId", task_id);
        self.track_event(EventType::TaskCompleted, Some(metadata), None)
            .await;
    }

    /// Track an application-defined event
    pub async fn track_custom_event(&self, event_name: &str, metadata: Option<Metadata>) {
        let metadata = with_capture_fields(metadata, "eventName", event_name);
        self.track_event(EventType::Custom, Some(metadata), None)
            .await;
    }
}

/// Merge the kind-specific field and a capture timestamp into caller metadata
///
/// The fixed fields win over caller-supplied keys of the same name.
fn with_capture_fields(metadata: Option<Metadata>, key: &str, value: &str) -> Metadata {
    let mut metadata = metadata.unwrap_or_default();
    metadata.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    metadata.insert(
        "timestamp".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata
}
