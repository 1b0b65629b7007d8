//! Shared data contracts for the analytics pipeline
//!
//! These types are the interchange schema between the tracking client, the
//! collection backend, and the dashboard/report consumers. Field names and
//! enumeration values are fixed on the wire (camelCase fields, snake_case
//! enum values); changing either is a contract change, not a refactor.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Event** | A single recorded occurrence of a recognized kind, timestamped and attributable to a user and session |
//! | **Envelope** | The fully assembled payload (kind + metadata + identifiers) ready for transmission |
//! | **Session** | An opaque correlation token grouping events from one continuous usage period |
//! | **Taxonomy** | The closed set of recognized event kinds ([`EventType`]) |
//!
//! This module is purely declarative: no operations, no side effects. The
//! tracking client only ever constructs events; metrics, dashboard snapshots,
//! and reports are produced by external collaborators that honor these shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Open metadata mapping attached to events and report filters
///
/// String keys to arbitrary JSON values: a loosely-typed side channel on an
/// otherwise strongly-typed envelope.
pub type Metadata = HashMap<String, serde_json::Value>;

// ============================================
// Event taxonomy
// ============================================

/// The closed set of recognized event kinds
///
/// A payload whose kind is outside this set is a schema violation on the
/// receiving side. Adding a kind here is a contract change shared with the
/// backend and every downstream consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PageView,
    TaskCreated,
    TaskCompleted,
    TaskUpdated,
    UserLogin,
    UserLogout,
    ReportGenerated,
    Custom,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PageView => "page_view",
            EventType::TaskCreated => "task_created",
            EventType::TaskCompleted => "task_completed",
            EventType::TaskUpdated => "task_updated",
            EventType::UserLogin => "user_login",
            EventType::UserLogout => "user_logout",
            EventType::ReportGenerated => "report_generated",
            EventType::Custom => "custom",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page_view" => Ok(EventType::PageView),
            "task_created" => Ok(EventType::TaskCreated),
            "task_completed" => Ok(EventType::TaskCompleted),
            "task_updated" => Ok(EventType::TaskUpdated),
            "user_login" => Ok(EventType::UserLogin),
            "user_logout" => Ok(EventType::UserLogout),
            "report_generated" => Ok(EventType::ReportGenerated),
            "custom" => Ok(EventType::Custom),
            _ => Err(format!("unknown event type: {}", s)),
        }
    }
}

// ============================================
// Events
// ============================================

/// A single recorded analytics event
///
/// `user_id` and `timestamp` are always present at creation; `session_id` is
/// attached by the tracking client when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Unique identifier
    pub id: String,
    /// Event kind, a member of the closed taxonomy
    pub event_type: EventType,
    /// Identifier of the user the event is attributed to
    pub user_id: String,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Open metadata mapping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Opaque session correlation token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

// ============================================
// Metrics
// ============================================

/// A named scalar measurement
///
/// The unit of aggregation the backend produces from raw events; never
/// computed by the tracking client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricData {
    /// Metric name (e.g., `tasks_completed_per_day`)
    pub name: String,
    /// Measured value
    pub value: f64,
    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,
    /// Optional dimension tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Active-user counts at three granularities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveUserCounts {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
}

/// Fixed-shape dashboard snapshot
///
/// Read contract for the dashboard consumer; this crate never constructs one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Total number of tasks
    pub total_tasks: u64,
    /// Number of completed tasks
    pub completed_tasks: u64,
    /// Number of not-yet-completed tasks
    pub pending_tasks: u64,
    /// Completed / total, in [0, 1]
    pub completion_rate: f64,
    /// Active users at daily/weekly/monthly granularity
    pub active_users: ActiveUserCounts,
}

/// Chart-ready series data for dashboard rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    /// X-axis labels
    pub labels: Vec<String>,
    /// One or more series aligned to `labels`
    pub datasets: Vec<ChartDataset>,
}

/// A single chart series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

// ============================================
// Reports
// ============================================

/// Kind of report to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    TaskSummary,
    Productivity,
    UserActivity,
    Custom,
}

/// Inclusive date range a report covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// How often a scheduled report recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// Recurring delivery schedule for a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSchedule {
    pub frequency: ScheduleFrequency,
    /// Destinations the generated report is delivered to
    pub recipients: Vec<String>,
}

/// Definition of a report
///
/// Realized asynchronously into a [`GeneratedReport`] by an external
/// report-generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub report_type: ReportType,
    pub date_range: DateRange,
    /// Names of the metrics to include
    pub metrics: Vec<String>,
    /// Optional dimension filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Metadata>,
    /// Optional recurring schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ReportSchedule>,
}

/// Output format of a generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Json,
    Csv,
    Pdf,
}

/// A realized report
///
/// Carries either the payload inline (`data`) or the location of the stored
/// output (`url`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub id: String,
    /// The config this report was generated from
    pub config: ReportConfig,
    /// When generation completed
    pub generated_at: DateTime<Utc>,
    pub format: ReportFormat,
    /// Inline payload, if small enough to embed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Location of the stored output, if not inline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
