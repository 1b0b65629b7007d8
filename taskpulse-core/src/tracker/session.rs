//! Session identifier generation
//!
//! A session id correlates events emitted within one continuous usage period.
//! It is minted lazily by the tracker when a call supplies none, and is not
//! persisted: two calls without an explicit id land in two distinct sessions
//! unless the caller threads the same value through.

use uuid::Uuid;

/// Fixed prefix on every generated session id
pub const SESSION_ID_PREFIX: &str = "session_";

/// Length of the random alphanumeric suffix
const SUFFIX_LEN: usize = 9;

/// Generate a fresh session identifier
///
/// Format: `session_<unix millis>_<9-char alphanumeric suffix>`. The value is
/// advisory correlation metadata, not an access credential; uniqueness is
/// high-probability, not guaranteed.
pub fn generate_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{}{}_{}", SESSION_ID_PREFIX, millis, suffix)
}
