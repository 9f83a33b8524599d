//! Registration domain records.
//!
//! # Responsibility
//! - Define the plain records persisted by the repository layer.
//! - Provide value-equality field diffs used by partial updates.
//!
//! # Invariants
//! - Every record is identified by an `EntityId` that never changes once
//!   assigned.
//! - `GENERATED_ID` is reserved and never stored.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod lecturer;
pub mod student;

/// Row identifier shared by all registration tables.
pub type EntityId = i64;

/// Sentinel id asking the database to assign the identifier on insert.
pub const GENERATED_ID: EntityId = -1;

/// Record family, used to label errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Student,
    Lecturer,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
