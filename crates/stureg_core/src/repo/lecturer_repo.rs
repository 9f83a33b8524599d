//! Lecturer repository contract and SQLite implementation.
//!
//! Inserts and name lookups have no defined behavior for lecturers yet and
//! report `RepoError::Unsupported`.

use super::diff_update::{apply_diff_update, DiffTarget, UpdateReport};
use super::error::{RepoError, RepoResult};
use super::log_failure;
use super::schema::ensure_table_ready;
use super::statements::{delete_row, update_single_column};
use crate::model::lecturer::{Lecturer, LecturerField};
use crate::model::{EntityId, EntityKind};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

const LECTURER_SELECT_SQL: &str = "SELECT id, firstname, lastname, position FROM lecturer";
const REQUIRED_COLUMNS: [&str; 4] = ["id", "firstname", "lastname", "position"];

/// Repository interface for lecturer records.
pub trait LecturerRepository {
    fn create(&self, lecturer: &Lecturer) -> RepoResult<EntityId>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Lecturer>>;
    fn get_all(&self) -> RepoResult<Vec<Lecturer>>;
    fn find_by_firstname(&self, firstname: &str) -> RepoResult<Vec<Lecturer>>;
    fn find_by_lastname(&self, lastname: &str) -> RepoResult<Vec<Lecturer>>;
    fn update(&self, lecturer: &Lecturer) -> RepoResult<UpdateReport<LecturerField>>;
    fn update_firstname(&self, id: EntityId, firstname: &str) -> RepoResult<()>;
    fn update_lastname(&self, id: EntityId, lastname: &str) -> RepoResult<()>;
    fn update_position(&self, id: EntityId, position: &str) -> RepoResult<()>;
    fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed lecturer repository.
pub struct SqliteLecturerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLecturerRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, EntityKind::Lecturer.table(), &REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    fn update_column(&self, field: LecturerField, value: &str, id: EntityId) -> RepoResult<()> {
        let column = lecturer_column(field);
        debug!("event=lecturer_update_field module=repo status=start id={id} field={column}");
        update_single_column(self.conn, EntityKind::Lecturer, column, &value, id)
            .inspect_err(|err| log_failure("lecturer_update_field", Some(id), err))
    }
}

impl LecturerRepository for SqliteLecturerRepository<'_> {
    fn create(&self, _lecturer: &Lecturer) -> RepoResult<EntityId> {
        unsupported("lecturer create")
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Lecturer>> {
        load_lecturer(self.conn, id)
            .inspect_err(|err| log_failure("lecturer_find", Some(id), err))
    }

    fn get_all(&self) -> RepoResult<Vec<Lecturer>> {
        list_lecturers(self.conn).inspect_err(|err| log_failure("lecturer_list", None, err))
    }

    fn find_by_firstname(&self, _firstname: &str) -> RepoResult<Vec<Lecturer>> {
        unsupported("lecturer find_by_firstname")
    }

    fn find_by_lastname(&self, _lastname: &str) -> RepoResult<Vec<Lecturer>> {
        unsupported("lecturer find_by_lastname")
    }

    fn update(&self, lecturer: &Lecturer) -> RepoResult<UpdateReport<LecturerField>> {
        let report = apply_diff_update(self.conn, lecturer)
            .inspect_err(|err| log_failure("lecturer_update", Some(lecturer.id), err))?;
        debug!(
            "event=lecturer_update module=repo status=ok id={} changed={:?}",
            lecturer.id, report.changed
        );
        Ok(report)
    }

    fn update_firstname(&self, id: EntityId, firstname: &str) -> RepoResult<()> {
        self.update_column(LecturerField::Firstname, firstname, id)
    }

    fn update_lastname(&self, id: EntityId, lastname: &str) -> RepoResult<()> {
        self.update_column(LecturerField::Lastname, lastname, id)
    }

    fn update_position(&self, id: EntityId, position: &str) -> RepoResult<()> {
        self.update_column(LecturerField::Position, position, id)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        delete_row(self.conn, EntityKind::Lecturer, id)
            .inspect_err(|err| log_failure("lecturer_delete", Some(id), err))
    }
}

impl DiffTarget for Lecturer {
    type Field = LecturerField;

    const KIND: EntityKind = EntityKind::Lecturer;

    fn id(&self) -> EntityId {
        self.id
    }

    fn changed_fields(&self, previous: &Self) -> Vec<LecturerField> {
        Lecturer::changed_fields(self, previous)
    }

    fn column(field: LecturerField) -> &'static str {
        lecturer_column(field)
    }

    fn column_value(&self, field: LecturerField) -> Value {
        let text = match field {
            LecturerField::Position => &self.position,
            LecturerField::Firstname => &self.firstname,
            LecturerField::Lastname => &self.lastname,
        };
        Value::Text(text.clone())
    }

    fn load(conn: &Connection, id: EntityId) -> RepoResult<Option<Self>> {
        load_lecturer(conn, id)
    }
}

fn unsupported<T>(operation: &'static str) -> RepoResult<T> {
    warn!("event=repo_unsupported module=repo status=error operation=\"{operation}\"");
    Err(RepoError::Unsupported(operation))
}

fn load_lecturer(conn: &Connection, id: EntityId) -> RepoResult<Option<Lecturer>> {
    let mut stmt = conn.prepare(&format!("{LECTURER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_lecturer_row(row)?)),
        None => Ok(None),
    }
}

fn list_lecturers(conn: &Connection) -> RepoResult<Vec<Lecturer>> {
    let mut stmt = conn.prepare(&format!("{LECTURER_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut lecturers = Vec::new();
    while let Some(row) = rows.next()? {
        lecturers.push(parse_lecturer_row(row)?);
    }
    Ok(lecturers)
}

fn parse_lecturer_row(row: &Row<'_>) -> RepoResult<Lecturer> {
    Ok(Lecturer {
        id: row.get("id")?,
        firstname: row.get("firstname")?,
        lastname: row.get("lastname")?,
        position: row.get("position")?,
    })
}

fn lecturer_column(field: LecturerField) -> &'static str {
    match field {
        LecturerField::Position => "position",
        LecturerField::Firstname => "firstname",
        LecturerField::Lastname => "lastname",
    }
}
