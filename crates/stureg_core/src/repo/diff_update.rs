//! Partial ("diff") updates shared by all record families.
//!
//! # Invariants
//! - The persisted row is read and written inside one IMMEDIATE transaction.
//! - Only changed columns are written, in a single UPDATE statement.
//! - Every exit path other than a successful write rolls the transaction back.

use super::error::{RepoError, RepoResult};
use super::statements::build_update_sql;
use crate::model::{EntityId, EntityKind};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use serde::Serialize;
use std::fmt::Debug;

/// Fields written by one partial update, in write order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport<F> {
    pub changed: Vec<F>,
}

impl<F> UpdateReport<F> {
    /// Returns whether the requested record already matched storage.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Record family that supports partial updates.
pub(crate) trait DiffTarget: Sized {
    type Field: Copy + Debug;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;
    fn changed_fields(&self, previous: &Self) -> Vec<Self::Field>;
    fn column(field: Self::Field) -> &'static str;
    fn column_value(&self, field: Self::Field) -> Value;
    fn load(conn: &Connection, id: EntityId) -> RepoResult<Option<Self>>;
}

/// Writes the columns of `target` that differ from the stored row.
pub(crate) fn apply_diff_update<T: DiffTarget>(
    conn: &Connection,
    target: &T,
) -> RepoResult<UpdateReport<T::Field>> {
    let id = target.id();
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let Some(previous) = T::load(&tx, id)? else {
        tx.rollback()?;
        return Err(RepoError::NotFound {
            entity: T::KIND,
            id,
        });
    };

    let changed = target.changed_fields(&previous);
    if changed.is_empty() {
        tx.rollback()?;
        return Ok(UpdateReport { changed });
    }

    let columns = changed.iter().map(|field| T::column(*field)).collect::<Vec<_>>();
    let mut values = changed
        .iter()
        .map(|field| target.column_value(*field))
        .collect::<Vec<_>>();
    values.push(Value::Integer(id));

    // Dropping `tx` on an early return rolls back.
    tx.execute(
        &build_update_sql(T::KIND.table(), &columns),
        params_from_iter(values),
    )?;
    tx.commit()?;

    Ok(UpdateReport { changed })
}
