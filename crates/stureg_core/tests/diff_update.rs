use chrono::NaiveDate;
use rusqlite::{params, Connection};
use stureg_core::db::open_db_in_memory;
use stureg_core::{
    EntityKind, Lecturer, LecturerField, LecturerRepository, RepoError, SqliteLecturerRepository,
    SqliteStudentRepository, Student, StudentField, StudentRepository,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_student(conn: &Connection) -> Student {
    let repo = SqliteStudentRepository::try_new(conn).unwrap();
    let student = Student::with_id(1, "Ada", "Lovelace", date(2020, 9, 1));
    repo.create(&student).unwrap();
    student
}

fn seed_lecturer(conn: &Connection, lecturer: &Lecturer) {
    conn.execute(
        "INSERT INTO lecturer (id, firstname, lastname, position) VALUES (?1, ?2, ?3, ?4);",
        params![
            lecturer.id,
            lecturer.firstname,
            lecturer.lastname,
            lecturer.position
        ],
    )
    .unwrap();
}

fn total_changes(conn: &Connection) -> i64 {
    conn.query_row("SELECT total_changes();", [], |row| row.get(0))
        .unwrap()
}

fn student_row(conn: &Connection, id: i64) -> (String, String, String) {
    conn.query_row(
        "SELECT firstname, lastname, reg_date FROM student WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .unwrap()
}

#[test]
fn update_applies_changed_fields_and_keeps_the_rest() {
    let conn = open_db_in_memory().unwrap();
    let original = seeded_student(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut target = original.clone();
    target.lastname = "King".to_string();
    target.reg_date = date(2021, 1, 4);

    let report = repo.update(&target).unwrap();
    assert_eq!(
        report.changed,
        vec![StudentField::RegDate, StudentField::Lastname]
    );

    assert_eq!(repo.find_by_id(1).unwrap().unwrap(), target);
}

#[test]
fn repeated_update_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let original = seeded_student(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut target = original.clone();
    target.firstname = "Augusta".to_string();

    let first = repo.update(&target).unwrap();
    assert_eq!(first.changed, vec![StudentField::Firstname]);

    let changes_before = total_changes(&conn);
    let second = repo.update(&target).unwrap();
    assert!(second.is_noop());
    assert_eq!(total_changes(&conn), changes_before);
    assert_eq!(repo.find_by_id(1).unwrap().unwrap(), target);
}

#[test]
fn update_of_missing_id_is_not_found_and_leaves_table_unchanged() {
    let conn = open_db_in_memory().unwrap();
    seeded_student(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let before = repo.get_all().unwrap();

    let ghost = Student::with_id(404, "Ghost", "Student", date(2020, 1, 1));
    let err = repo.update(&ghost).unwrap_err();

    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Student,
            id: 404
        }
    ));
    assert_eq!(repo.get_all().unwrap(), before);
    assert!(conn.is_autocommit(), "transaction must not be left open");
}

#[test]
fn failure_on_later_field_rolls_back_earlier_fields() {
    let conn = open_db_in_memory().unwrap();
    let original = seeded_student(&conn);
    conn.execute_batch(
        "CREATE TRIGGER reject_firstname
         BEFORE UPDATE OF firstname ON student
         WHEN NEW.firstname = 'Rejected'
         BEGIN
             SELECT RAISE(ABORT, 'firstname rejected');
         END;",
    )
    .unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut target = original.clone();
    target.reg_date = date(2022, 2, 2);
    target.firstname = "Rejected".to_string();
    target.lastname = "Byron".to_string();

    let err = repo.update(&target).unwrap_err();
    assert!(matches!(err, RepoError::ConstraintViolation(_)), "{err}");

    assert_eq!(
        student_row(&conn, 1),
        (
            "Ada".to_string(),
            "Lovelace".to_string(),
            "2020-09-01".to_string()
        )
    );
    assert!(conn.is_autocommit(), "transaction must not be left open");

    // The connection stays usable after the rollback.
    target.firstname = "Augusta".to_string();
    repo.update(&target).unwrap();
    assert_eq!(repo.find_by_id(1).unwrap().unwrap(), target);
}

#[test]
fn update_never_rewrites_the_id() {
    let conn = open_db_in_memory().unwrap();
    let original = seeded_student(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let mut target = original.clone();
    target.firstname = "Augusta".to_string();
    repo.update(&target).unwrap();

    let ids: Vec<_> = repo.get_all().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![original.id]);
}

#[test]
fn lecturer_update_checks_position_first() {
    let conn = open_db_in_memory().unwrap();
    let original = Lecturer::new(9, "Donald", "Knuth", "Lecturer");
    seed_lecturer(&conn, &original);
    let repo = SqliteLecturerRepository::try_new(&conn).unwrap();

    let target = Lecturer::new(9, "Don", "Knuth", "Professor Emeritus");
    let report = repo.update(&target).unwrap();

    assert_eq!(
        report.changed,
        vec![LecturerField::Position, LecturerField::Firstname]
    );
    assert_eq!(repo.find_by_id(9).unwrap().unwrap(), target);
    assert!(repo.update(&target).unwrap().is_noop());
}

#[test]
fn lecturer_update_of_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLecturerRepository::try_new(&conn).unwrap();

    let err = repo
        .update(&Lecturer::new(3, "No", "One", "Visiting"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: EntityKind::Lecturer,
            id: 3
        }
    ));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn update_inside_caller_transaction_is_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let original = seeded_student(&conn);
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    conn.execute_batch("BEGIN;").unwrap();
    let mut target = original.clone();
    target.lastname = "King".to_string();
    let err = repo.update(&target).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)), "{err}");
    conn.execute_batch("ROLLBACK;").unwrap();

    assert_eq!(repo.find_by_id(1).unwrap().unwrap(), original);
}
