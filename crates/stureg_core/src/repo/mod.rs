//! Repository layer for registration records.
//!
//! # Responsibility
//! - Define per-record data access contracts.
//! - Keep SQLite statements and row mapping out of callers.
//!
//! # Invariants
//! - Repositories borrow a caller-owned, migrated connection.
//! - Failures are logged once here and returned as `RepoError`, never
//!   swallowed.
//! - Partial updates are all-or-nothing.

use crate::model::EntityId;
use log::{error, warn};

pub mod diff_update;
pub mod error;
pub mod lecturer_repo;
mod schema;
mod statements;
pub mod student_repo;

pub use diff_update::UpdateReport;
pub use error::{RepoError, RepoResult};

/// Emits one `status=error` event for a failed repository call.
///
/// Only ids and error codes are logged, never names.
pub(crate) fn log_failure(event: &str, id: Option<EntityId>, err: &RepoError) {
    let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match err {
        RepoError::NotFound { .. } | RepoError::ConstraintViolation(_) => warn!(
            "event={event} module=repo status=error id={id} error_code={} error={err}",
            err.code()
        ),
        _ => error!(
            "event={event} module=repo status=error id={id} error_code={} error={err}",
            err.code()
        ),
    }
}
