//! Tests for Session
//!
//! These tests verify:
//! - Opening with and without an existing data file
//! - Command execution and the outcomes it produces
//! - Save/load path resolution
//! - Autosave on close

use std::fs;
use std::path::PathBuf;

use tabula::shell::{parse_command, Command};
use tabula::{Config, LoadMode, Outcome, Session, TabulaError};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.txt");
    (temp_dir, path)
}

fn run(session: &mut Session, line: &str) -> Outcome {
    let command = parse_command(line).unwrap().unwrap();
    session.execute(command).unwrap()
}

fn try_run(session: &mut Session, line: &str) -> tabula::Result<Outcome> {
    let command = parse_command(line).unwrap().unwrap();
    session.execute(command)
}

fn setup_employees(session: &mut Session) {
    run(session, "createTable Employees ID int Name string Salary double");
    run(session, "insert Employees ID:1 Name:John Salary:50000");
    run(session, "insert Employees ID:2 Name:Ann Salary:65000");
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_missing_file_starts_empty() {
    let (_temp, path) = setup_temp_dir();

    let session = Session::open(Config::builder().data_file(&path).build()).unwrap();

    assert!(session.store().is_empty());
    assert_eq!(session.data_file(), Some(path.as_path()));
    // Opening alone never creates the file
    assert!(!path.exists());
}

#[test]
fn test_open_missing_file_without_create_missing() {
    let (_temp, path) = setup_temp_dir();
    let config = Config::builder()
        .data_file(&path)
        .create_missing(false)
        .build();

    let result = Session::open(config);

    assert!(matches!(result, Err(TabulaError::Config(_))));
}

#[test]
fn test_open_loads_existing_file() {
    let (_temp, path) = setup_temp_dir();
    {
        let mut session = Session::open(Config::builder().data_file(&path).build()).unwrap();
        setup_employees(&mut session);
        session.save().unwrap();
    }

    let session = Session::open(Config::builder().data_file(&path).build()).unwrap();

    assert_eq!(session.store().table("Employees").unwrap().row_count(), 2);
}

#[test]
fn test_open_strict_rejects_malformed_file() {
    let (_temp, path) = setup_temp_dir();
    fs::write(&path, "Table: T\n  what is this\n").unwrap();

    let lenient = Session::open(Config::builder().data_file(&path).build());
    let strict = Session::open(
        Config::builder()
            .data_file(&path)
            .load_mode(LoadMode::Strict)
            .build(),
    );

    assert!(lenient.is_ok());
    assert!(matches!(
        strict,
        Err(TabulaError::MalformedEncoding { line: 2, .. })
    ));
}

// =============================================================================
// Execute Tests
// =============================================================================

#[test]
fn test_execute_status_messages() {
    let mut session = Session::in_memory();

    assert_eq!(
        run(&mut session, "createTable Employees ID int"),
        Outcome::Done("Table Employees created".to_string())
    );
    assert_eq!(
        run(&mut session, "addColumn Employees Age int"),
        Outcome::Done("Column Age added to table Employees".to_string())
    );
    assert_eq!(
        run(&mut session, "insert Employees ID:1"),
        Outcome::Done("Data inserted into table Employees".to_string())
    );
    assert_eq!(
        run(&mut session, "dropTable Employees"),
        Outcome::Done("Table Employees dropped".to_string())
    );
}

#[test]
fn test_execute_update_query_delete() {
    let mut session = Session::in_memory();
    setup_employees(&mut session);

    assert_eq!(
        run(&mut session, "update Employees Salary:70000 where Name:Ann"),
        Outcome::Affected(1)
    );

    match run(&mut session, "query Employees Name: Salary: where ID:2") {
        Outcome::Rows(result) => {
            assert_eq!(result.header, vec!["Name", "Salary"]);
            assert_eq!(result.rows, vec![vec!["Ann", "70000.0"]]);
        }
        other => panic!("expected rows, got {:?}", other),
    }

    assert_eq!(run(&mut session, "delete Employees where ID:1"), Outcome::Affected(1));
    assert_eq!(session.store().table("Employees").unwrap().row_count(), 1);
}

#[test]
fn test_execute_tables_and_describe() {
    let mut session = Session::in_memory();
    setup_employees(&mut session);

    assert_eq!(
        run(&mut session, "tables"),
        Outcome::Tables(vec!["Employees".to_string()])
    );

    match run(&mut session, "describe Employees") {
        Outcome::Schema(columns) => {
            let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["ID", "Name", "Salary"]);
        }
        other => panic!("expected schema, got {:?}", other),
    }

    assert!(matches!(
        try_run(&mut session, "describe Ghost"),
        Err(TabulaError::NotFound { .. })
    ));
}

#[test]
fn test_execute_errors_leave_session_usable() {
    let mut session = Session::in_memory();
    setup_employees(&mut session);

    assert!(try_run(&mut session, "insert Employees ghost:1").is_err());
    assert!(try_run(&mut session, "update Employees ID:abc").is_err());
    assert!(try_run(&mut session, "query Ghost").is_err());

    assert_eq!(session.store().table("Employees").unwrap().row_count(), 2);
    assert_eq!(run(&mut session, "delete Employees"), Outcome::Affected(2));
}

#[test]
fn test_help_and_exit() {
    let mut session = Session::in_memory();

    match run(&mut session, "help") {
        Outcome::Done(text) => assert!(text.contains("createTable")),
        other => panic!("expected help text, got {:?}", other),
    }
    assert_eq!(run(&mut session, "exit"), Outcome::Exit);
}

// =============================================================================
// Save / Load Tests
// =============================================================================

#[test]
fn test_save_without_any_path_is_config_error() {
    let mut session = Session::in_memory();

    assert!(matches!(session.save(), Err(TabulaError::Config(_))));
    assert!(matches!(
        session.execute(Command::Save { path: None }),
        Err(TabulaError::Config(_))
    ));
}

#[test]
fn test_save_and_load_explicit_path() {
    let (_temp, path) = setup_temp_dir();
    let mut session = Session::in_memory();
    setup_employees(&mut session);

    let saved = run(&mut session, &format!("save {}", path.display()));
    assert_eq!(
        saved,
        Outcome::Done(format!("Database saved to {}", path.display()))
    );

    let mut other = Session::in_memory();
    match run(&mut other, &format!("load {}", path.display())) {
        Outcome::Loaded(report) => {
            assert_eq!(report.tables, 1);
            assert_eq!(report.rows, 2);
            assert_eq!(report.skipped_lines, 0);
        }
        outcome => panic!("expected load report, got {:?}", outcome),
    }
    assert_eq!(other.store(), session.store());
}

#[test]
fn test_bare_save_uses_data_file() {
    let (_temp, path) = setup_temp_dir();
    let mut session = Session::open(Config::builder().data_file(&path).build()).unwrap();
    setup_employees(&mut session);

    run(&mut session, "save");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Table: Employees\n"));
}

#[test]
fn test_close_with_autosave_writes_file() {
    let (_temp, path) = setup_temp_dir();
    let config = Config::builder().data_file(&path).autosave(true).build();

    let mut session = Session::open(config).unwrap();
    setup_employees(&mut session);
    session.close().unwrap();

    let reopened = Session::open(Config::builder().data_file(&path).build()).unwrap();
    assert_eq!(reopened.store().table("Employees").unwrap().row_count(), 2);
}

#[test]
fn test_close_without_autosave_writes_nothing() {
    let (_temp, path) = setup_temp_dir();

    let mut session = Session::open(Config::builder().data_file(&path).build()).unwrap();
    setup_employees(&mut session);
    session.close().unwrap();

    assert!(!path.exists());
}
