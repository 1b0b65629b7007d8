//! # taskpulse-core
//!
//! Client-side telemetry emitter for the taskpulse application.
//!
//! This library provides:
//! - The closed event taxonomy and the payload contracts shared with the
//!   analytics backend and dashboard/report consumers
//! - A fire-and-forget tracking client that delivers events to the remote
//!   collection endpoint
//! - Configuration and logging infrastructure
//!
//! ## Delivery discipline
//!
//! Every tracking call makes at most one delivery attempt. Transport
//! failures and non-success responses are logged and swallowed; telemetry
//! must never interrupt the action it is instrumenting. There is no retry,
//! ordering, or offline buffering.
//!
//! ## Example
//!
//! ```rust,no_run
//! use taskpulse_core::{Tracker, TrackerConfig};
//!
//! # async fn example() -> taskpulse_core::Result<()> {
//! let config = TrackerConfig::new("https://app.example.com");
//! let tracker = Tracker::with_placeholder_identity(config)?;
//!
//! tracker.track_page_view("home", None).await;
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::TrackerConfig;
pub use contracts::*;
pub use error::{Error, Result};
pub use tracker::{IdentityProvider, PlaceholderIdentity, Tracker, PLACEHOLDER_USER_ID};

// Public modules
pub mod config;
pub mod contracts;
pub mod error;
pub mod logging;
pub mod tracker;
