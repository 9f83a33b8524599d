//! Student record.
//!
//! # Invariants
//! - `id` is either `GENERATED_ID` (not yet persisted) or the stored row id.
//! - Names and registration date are independently updatable.

use super::{EntityId, GENERATED_ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mutable student columns, in the order partial updates inspect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentField {
    RegDate,
    Firstname,
    Lastname,
}

impl StudentField {
    /// Fixed inspection order for diffs.
    pub const ALL: [StudentField; 3] = [Self::RegDate, Self::Firstname, Self::Lastname];
}

/// Registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub firstname: String,
    pub lastname: String,
    /// Day the student registered, stored as `YYYY-MM-DD`.
    pub reg_date: NaiveDate,
}

impl Student {
    /// Creates a student whose id is assigned by the database on insert.
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        reg_date: NaiveDate,
    ) -> Self {
        Self::with_id(GENERATED_ID, firstname, lastname, reg_date)
    }

    /// Creates a student carrying a caller-supplied id.
    pub fn with_id(
        id: EntityId,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        reg_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            reg_date,
        }
    }

    /// Returns whether insert should let the database pick the id.
    pub fn has_generated_id(&self) -> bool {
        self.id == GENERATED_ID
    }

    /// Lists fields whose values differ from `previous`.
    ///
    /// Comparison is by value and the result follows `StudentField::ALL`
    /// order. `id` is never part of the diff.
    pub fn changed_fields(&self, previous: &Student) -> Vec<StudentField> {
        StudentField::ALL
            .into_iter()
            .filter(|field| match field {
                StudentField::RegDate => self.reg_date != previous.reg_date,
                StudentField::Firstname => self.firstname != previous.firstname,
                StudentField::Lastname => self.lastname != previous.lastname,
            })
            .collect()
    }
}
