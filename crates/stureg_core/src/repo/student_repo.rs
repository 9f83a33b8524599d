//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over the `student` table with parameterized statements.
//! - Map rows to `Student` records and back.
//!
//! # Invariants
//! - `id` is never written after insert.
//! - `cou_fk` is always inserted as NULL and never read.
//! - `reg_date` is stored as `YYYY-MM-DD` text.

use super::diff_update::{apply_diff_update, DiffTarget, UpdateReport};
use super::error::{RepoError, RepoResult};
use super::log_failure;
use super::schema::ensure_table_ready;
use super::statements::{delete_row, update_single_column};
use crate::model::student::{Student, StudentField};
use crate::model::{EntityId, EntityKind};
use chrono::NaiveDate;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row, ToSql};

const STUDENT_SELECT_SQL: &str = "SELECT id, firstname, lastname, reg_date FROM student";
const REG_DATE_FORMAT: &str = "%Y-%m-%d";
const REQUIRED_COLUMNS: [&str; 5] = ["id", "firstname", "lastname", "reg_date", "cou_fk"];

/// Repository interface for student records.
pub trait StudentRepository {
    /// Inserts a student and returns its id.
    ///
    /// A record carrying `GENERATED_ID` gets a database-assigned id.
    fn create(&self, student: &Student) -> RepoResult<EntityId>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Student>>;
    fn get_all(&self) -> RepoResult<Vec<Student>>;
    fn find_by_firstname(&self, firstname: &str) -> RepoResult<Vec<Student>>;
    fn find_by_lastname(&self, lastname: &str) -> RepoResult<Vec<Student>>;
    fn find_by_reg_date(&self, reg_date: NaiveDate) -> RepoResult<Vec<Student>>;
    /// Writes only the fields that differ from the stored row, atomically.
    fn update(&self, student: &Student) -> RepoResult<UpdateReport<StudentField>>;
    fn update_firstname(&self, id: EntityId, firstname: &str) -> RepoResult<()>;
    fn update_lastname(&self, id: EntityId, lastname: &str) -> RepoResult<()>;
    fn update_reg_date(&self, id: EntityId, reg_date: NaiveDate) -> RepoResult<()>;
    fn delete_by_id(&self, id: EntityId) -> RepoResult<()>;
}

/// SQLite-backed student repository borrowing a caller-owned connection.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Wraps a migrated connection, rejecting one without the student schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, EntityKind::Student.table(), &REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    fn select_where(&self, column: &str, value: &dyn ToSql) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL} WHERE {column} = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params![value])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn update_column(
        &self,
        field: StudentField,
        value: &dyn ToSql,
        id: EntityId,
    ) -> RepoResult<()> {
        let column = student_column(field);
        debug!("event=student_update_field module=repo status=start id={id} field={column}");
        update_single_column(self.conn, EntityKind::Student, column, value, id)
            .inspect_err(|err| log_failure("student_update_field", Some(id), err))
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create(&self, student: &Student) -> RepoResult<EntityId> {
        let reg_date = reg_date_to_db(student.reg_date);
        let inserted = if student.has_generated_id() {
            self.conn
                .execute(
                    "INSERT INTO student (firstname, lastname, reg_date, cou_fk)
                     VALUES (?1, ?2, ?3, NULL);",
                    params![student.firstname, student.lastname, reg_date],
                )
                .map(|_| self.conn.last_insert_rowid())
        } else {
            self.conn
                .execute(
                    "INSERT INTO student (id, firstname, lastname, reg_date, cou_fk)
                     VALUES (?1, ?2, ?3, ?4, NULL);",
                    params![student.id, student.firstname, student.lastname, reg_date],
                )
                .map(|_| student.id)
        };

        let id = inserted
            .map_err(RepoError::from)
            .inspect_err(|err| log_failure("student_create", None, err))?;
        debug!(
            "event=student_create module=repo status=ok id={id} generated={}",
            student.has_generated_id()
        );
        Ok(id)
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Student>> {
        load_student(self.conn, id).inspect_err(|err| log_failure("student_find", Some(id), err))
    }

    fn get_all(&self) -> RepoResult<Vec<Student>> {
        list_students(self.conn).inspect_err(|err| log_failure("student_list", None, err))
    }

    fn find_by_firstname(&self, firstname: &str) -> RepoResult<Vec<Student>> {
        self.select_where("firstname", &firstname)
            .inspect_err(|err| log_failure("student_find_by_firstname", None, err))
    }

    fn find_by_lastname(&self, lastname: &str) -> RepoResult<Vec<Student>> {
        self.select_where("lastname", &lastname)
            .inspect_err(|err| log_failure("student_find_by_lastname", None, err))
    }

    fn find_by_reg_date(&self, reg_date: NaiveDate) -> RepoResult<Vec<Student>> {
        self.select_where("reg_date", &reg_date_to_db(reg_date))
            .inspect_err(|err| log_failure("student_find_by_reg_date", None, err))
    }

    fn update(&self, student: &Student) -> RepoResult<UpdateReport<StudentField>> {
        let report = apply_diff_update(self.conn, student)
            .inspect_err(|err| log_failure("student_update", Some(student.id), err))?;
        debug!(
            "event=student_update module=repo status=ok id={} changed={:?}",
            student.id, report.changed
        );
        Ok(report)
    }

    fn update_firstname(&self, id: EntityId, firstname: &str) -> RepoResult<()> {
        self.update_column(StudentField::Firstname, &firstname, id)
    }

    fn update_lastname(&self, id: EntityId, lastname: &str) -> RepoResult<()> {
        self.update_column(StudentField::Lastname, &lastname, id)
    }

    fn update_reg_date(&self, id: EntityId, reg_date: NaiveDate) -> RepoResult<()> {
        self.update_column(StudentField::RegDate, &reg_date_to_db(reg_date), id)
    }

    fn delete_by_id(&self, id: EntityId) -> RepoResult<()> {
        delete_row(self.conn, EntityKind::Student, id)
            .inspect_err(|err| log_failure("student_delete", Some(id), err))
    }
}

impl DiffTarget for Student {
    type Field = StudentField;

    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> EntityId {
        self.id
    }

    fn changed_fields(&self, previous: &Self) -> Vec<StudentField> {
        Student::changed_fields(self, previous)
    }

    fn column(field: StudentField) -> &'static str {
        student_column(field)
    }

    fn column_value(&self, field: StudentField) -> Value {
        match field {
            StudentField::RegDate => Value::Text(reg_date_to_db(self.reg_date)),
            StudentField::Firstname => Value::Text(self.firstname.clone()),
            StudentField::Lastname => Value::Text(self.lastname.clone()),
        }
    }

    fn load(conn: &Connection, id: EntityId) -> RepoResult<Option<Self>> {
        load_student(conn, id)
    }
}

fn load_student(conn: &Connection, id: EntityId) -> RepoResult<Option<Student>> {
    let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_student_row(row)?)),
        None => Ok(None),
    }
}

fn list_students(conn: &Connection) -> RepoResult<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut students = Vec::new();
    while let Some(row) = rows.next()? {
        students.push(parse_student_row(row)?);
    }
    Ok(students)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let reg_date_text: String = row.get("reg_date")?;
    let reg_date = parse_reg_date(&reg_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{reg_date_text}` in student.reg_date"
        ))
    })?;

    Ok(Student {
        id: row.get("id")?,
        firstname: row.get("firstname")?,
        lastname: row.get("lastname")?,
        reg_date,
    })
}

fn student_column(field: StudentField) -> &'static str {
    match field {
        StudentField::RegDate => "reg_date",
        StudentField::Firstname => "firstname",
        StudentField::Lastname => "lastname",
    }
}

fn reg_date_to_db(date: NaiveDate) -> String {
    date.format(REG_DATE_FORMAT).to_string()
}

fn parse_reg_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, REG_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_reg_date, reg_date_to_db};
    use chrono::NaiveDate;

    #[test]
    fn reg_date_is_stored_as_iso_day() {
        let date = NaiveDate::from_ymd_opt(2019, 2, 3).unwrap();
        assert_eq!(reg_date_to_db(date), "2019-02-03");
        assert_eq!(parse_reg_date("2019-02-03"), Some(date));
    }

    #[test]
    fn parse_reg_date_rejects_other_shapes() {
        assert_eq!(parse_reg_date("03/02/2019"), None);
        assert_eq!(parse_reg_date(""), None);
    }
}
