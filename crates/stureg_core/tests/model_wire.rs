use chrono::NaiveDate;
use stureg_core::{Lecturer, Student, StudentField, GENERATED_ID};

#[test]
fn student_serializes_date_as_iso_day() {
    let student = Student::with_id(
        12,
        "Katherine",
        "Johnson",
        NaiveDate::from_ymd_opt(2022, 9, 5).unwrap(),
    );

    let json = serde_json::to_value(&student).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["firstname"], "Katherine");
    assert_eq!(json["lastname"], "Johnson");
    assert_eq!(json["reg_date"], "2022-09-05");

    let decoded: Student = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, student);
}

#[test]
fn generated_student_carries_sentinel_id() {
    let student = Student::new("Katherine", "Johnson", NaiveDate::from_ymd_opt(2022, 9, 5).unwrap());
    assert_eq!(student.id, GENERATED_ID);
    assert!(student.has_generated_id());
}

#[test]
fn field_names_are_snake_case() {
    assert_eq!(
        serde_json::to_value(StudentField::RegDate).unwrap(),
        "reg_date"
    );
}

#[test]
fn lecturer_diff_ignores_equal_values() {
    let before = Lecturer::new(1, "Ada", "Lovelace", "Lecturer");
    let after = Lecturer::new(1, String::from("Ada"), "Lovelace", "Lecturer");
    assert!(after.changed_fields(&before).is_empty());
}
