//! Analytics tracking client
//!
//! Application code calls a [`Tracker`] operation, the tracker builds a
//! canonical envelope from the shared [contracts](crate::contracts), and one
//! POST goes to the collection endpoint. The result is observed only for
//! logging, never surfaced to the caller.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskpulse_core::{Tracker, TrackerConfig};
//!
//! # async fn example() -> taskpulse_core::Result<()> {
//! let tracker = Tracker::with_placeholder_identity(
//!     TrackerConfig::new("https://app.example.com"),
//! )?;
//!
//! tracker.track_task_created("task-42", None).await;
//! # Ok(())
//! # }
//! ```

mod client;
mod session;

pub use client::{IdentityProvider, PlaceholderIdentity, Tracker, PLACEHOLDER_USER_ID};
pub use session::{generate_session_id, SESSION_ID_PREFIX};
