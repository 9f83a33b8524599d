//! Statement helpers shared by the student and lecturer repositories.

use super::error::{RepoError, RepoResult};
use crate::model::{EntityId, EntityKind};
use rusqlite::{params, Connection, ToSql};

/// Builds `UPDATE <table> SET c1 = ?1, c2 = ?2 WHERE id = ?N;`.
///
/// `columns` must come from a repository's fixed column whitelist, never from
/// caller input.
pub(crate) fn build_update_sql(table: &str, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {table} SET {assignments} WHERE id = ?{};",
        columns.len() + 1
    )
}

/// Writes one column of one row.
pub(crate) fn update_single_column(
    conn: &Connection,
    entity: EntityKind,
    column: &str,
    value: &dyn ToSql,
    id: EntityId,
) -> RepoResult<()> {
    let sql = build_update_sql(entity.table(), &[column]);
    let changed = conn.execute(&sql, params![value, id])?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

/// Removes one row by id.
pub(crate) fn delete_row(conn: &Connection, entity: EntityKind, id: EntityId) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1;", entity.table()),
        [id],
    )?;
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::build_update_sql;

    #[test]
    fn update_sql_numbers_parameters_in_column_order() {
        assert_eq!(
            build_update_sql("student", &["reg_date", "lastname"]),
            "UPDATE student SET reg_date = ?1, lastname = ?2 WHERE id = ?3;"
        );
    }

    #[test]
    fn single_column_update_sql() {
        assert_eq!(
            build_update_sql("lecturer", &["position"]),
            "UPDATE lecturer SET position = ?1 WHERE id = ?2;"
        );
    }
}
