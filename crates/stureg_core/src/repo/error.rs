//! Repository error model.
//!
//! Storage faults are classified instead of collapsed, so callers can tell
//! a missing row from a rejected write or a broken connection.

use crate::db::DbError;
use crate::model::{EntityId, EntityKind};
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// No row with this id exists.
    NotFound { entity: EntityKind, id: EntityId },
    /// SQLite rejected a write (primary key, NOT NULL, trigger abort).
    ConstraintViolation(String),
    /// Connection or engine failure.
    Db(DbError),
    /// A persisted row could not be mapped into a record.
    InvalidData(String),
    /// Operation has no defined behavior for this record family.
    Unsupported(&'static str),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::Db(_) => "db_failure",
            Self::InvalidData(_) => "invalid_data",
            Self::Unsupported(_) => "unsupported",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::ConstraintViolation(message) => write!(f, "constraint violation: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Unsupported(operation) => write!(f, "operation not supported: {operation}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(message.unwrap_or_else(|| err.to_string()))
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => Self::InvalidData(value.to_string()),
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}
