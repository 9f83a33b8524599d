//! Persistence core for the student registration system.
//! Repositories for `student` and `lecturer` rows over a caller-owned SQLite
//! connection.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::lecturer::{Lecturer, LecturerField};
pub use model::student::{Student, StudentField};
pub use model::{EntityId, EntityKind, GENERATED_ID};
pub use repo::lecturer_repo::{LecturerRepository, SqliteLecturerRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult, UpdateReport};

/// Minimal health-check API for embedding processes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
