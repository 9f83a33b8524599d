//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stureg_core` linkage, configuration and database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;
use stureg_core::{
    LecturerRepository, RepoError, SqliteLecturerRepository, SqliteStudentRepository,
    StoreConfig, StudentRepository,
};

fn main() -> ExitCode {
    println!("stureg_core ping={}", stureg_core::ping());
    println!("stureg_core version={}", stureg_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("stureg_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = StoreConfig::from_env()?;
    config.init_logging()?;

    let conn = config.open_db().map_err(|err| err.to_string())?;
    let students = SqliteStudentRepository::try_new(&conn)
        .and_then(|repo| repo.get_all())
        .map_err(describe)?;
    let lecturers = SqliteLecturerRepository::try_new(&conn)
        .and_then(|repo| repo.get_all())
        .map_err(describe)?;

    println!("db_path={}", config.db_path.display());
    println!("students={} lecturers={}", students.len(), lecturers.len());
    log::info!(
        "event=cli_probe module=cli status=ok students={} lecturers={}",
        students.len(),
        lecturers.len()
    );
    Ok(())
}

fn describe(err: RepoError) -> String {
    format!("{} ({})", err, err.code())
}
