// ==========================================
// ImportApi 端到端测试
// ==========================================
// 测试目标: SQLite 实库上的完整导入（院系参照 → 导入 → 批次记录 → 再次导入）
// ==========================================


use college_import::api::{ApiError, ImportApi};
use college_import::config::config_keys;
use college_import::domain::{ActorContext, LineErrorKind, RecordKind};
use college_import::importer::{render_csv_report, write_report};
use college_import::logging;
use college_import::repository::SqliteEntityStore;
use std::path::Path;
use test_helpers::{create_test_db, seed_departments, write_temp_file};

#[tokio::test]
async fn test_student_import_end_to_end() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    seed_departments(&db_path).expect("Failed to seed departments");

    let api = ImportApi::new(db_path.clone());
    let actor = ActorContext::new("registrar");

    let response = api
        .import_file(
            RecordKind::Student,
            Path::new("tests/fixtures/students.csv"),
            &actor,
        )
        .await
        .expect("import should succeed");

    assert_eq!(response.total_rows, 6);
    assert_eq!(response.success_count, 3);
    assert_eq!(response.failed_count, 3);
    assert_eq!(response.report_lines().len(), 3);
    assert_eq!(response.errors()[0].line_number, 5);

    // 写入与批次记录
    let store = SqliteEntityStore::new(&db_path).expect("store");
    assert_eq!(store.count(RecordKind::Student).expect("count"), 3);
    assert_eq!(store.count(RecordKind::Teacher).expect("count"), 0);

    let batch = store
        .find_batch(&response.batch_id)
        .expect("query batch")
        .expect("batch should be recorded");
    assert_eq!(batch.file_name.as_deref(), Some("students.csv"));
    assert_eq!(batch.imported_by, "registrar");
    assert_eq!((batch.total_rows, batch.success_rows, batch.failed_rows), (6, 3, 3));
}

#[tokio::test]
async fn test_reimport_reports_registered_emails() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    seed_departments(&db_path).expect("Failed to seed departments");

    let api = ImportApi::new(db_path.clone());
    let actor = ActorContext::system();
    let fixture = Path::new("tests/fixtures/teachers.csv");

    let first = api
        .import_file(RecordKind::Teacher, fixture, &actor)
        .await
        .expect("first import");
    assert_eq!(first.success_count, 2);

    let second = api
        .import_file(RecordKind::Teacher, fixture, &actor)
        .await
        .expect("second import");
    assert_eq!(second.success_count, 0);
    assert_eq!(second.outcome.count_by_kind(LineErrorKind::Conflict), 2);
    assert_eq!(
        second.report_lines()[0],
        "line 2: email already registered: jane.smith@example.com"
    );

    let store = SqliteEntityStore::new(&db_path).expect("store");
    assert_eq!(store.count(RecordKind::Teacher).expect("count"), 2);
}

#[tokio::test]
async fn test_departments_added_through_api_resolve() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = ImportApi::new(db_path);

    api.add_department("Civil Engineering", Some("CE"))
        .expect("add department");
    let duplicate = api.add_department("civil engineering", None);
    assert!(matches!(duplicate, Err(ApiError::BusinessRuleViolation(_))));
    let empty = api.add_department("   ", None);
    assert!(matches!(empty, Err(ApiError::ValidationError(_))));

    let departments = api.list_departments().expect("list");
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].code.as_deref(), Some("CE"));

    let content = "Name,Email,Mobile,Department,Semester,Section,Password\n\
                   Lata,lata@example.com,,CIVIL ENGINEERING,2,A,pw\n";
    let (_dir, path) = write_temp_file("civil.csv", content).expect("temp file");

    let response = api
        .import_file(RecordKind::Student, &path, &ActorContext::system())
        .await
        .expect("import");
    assert_eq!(response.success_count, 1);
    assert!(response.errors().is_empty());
}

#[tokio::test]
async fn test_config_applies_to_next_run() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    seed_departments(&db_path).expect("Failed to seed departments");
    let api = ImportApi::new(db_path);

    api.set_config(config_keys::MAX_ROWS, "2").expect("set max rows");
    let unknown = api.set_config("ui.theme", "dark");
    assert!(matches!(unknown, Err(ApiError::InvalidInput(_))));

    let result = api
        .import_file(
            RecordKind::Student,
            Path::new("tests/fixtures/students.csv"),
            &ActorContext::system(),
        )
        .await;
    match result {
        Err(ApiError::ImportError(msg)) => {
            assert_eq!(msg, "too many data rows: 6 exceeds the limit of 2")
        }
        other => panic!("expected structural import error, got {:?}", other.map(|r| r.batch_id)),
    }

    api.set_config(config_keys::MAX_ROWS, "100").expect("set max rows");
    api.set_config(config_keys::DEFAULT_PASSWORD, "Welcome@1")
        .expect("set default password");

    let content = "Name,Email,Mobile,Department,Semester,Section,Password\n\
                   Lata,lata@example.com,,Mathematics,2,A,\n";
    let (_dir, path) = write_temp_file("students.csv", content).expect("temp file");
    let response = api
        .import_file(RecordKind::Student, &path, &ActorContext::system())
        .await
        .expect("import");
    assert_eq!(response.success_count, 1);
}

#[tokio::test]
async fn test_missing_file_is_structural() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = ImportApi::new(db_path);

    let result = api
        .import_file(
            RecordKind::Student,
            Path::new("/nonexistent/students.csv"),
            &ActorContext::system(),
        )
        .await;
    assert!(matches!(result, Err(ApiError::ImportError(_))));
}

#[tokio::test]
async fn test_report_export_formats() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    seed_departments(&db_path).expect("Failed to seed departments");
    let api = ImportApi::new(db_path);

    let response = api
        .import_file(
            RecordKind::Student,
            Path::new("tests/fixtures/students.csv"),
            &ActorContext::system(),
        )
        .await
        .expect("import");

    let dir = tempfile::TempDir::new().expect("temp dir");

    let text_path = dir.path().join("report.txt");
    write_report(&response.outcome, &text_path).expect("write text report");
    let text = std::fs::read_to_string(&text_path).expect("read text report");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "3 records succeeded, 3 failed");
    assert_eq!(lines[1], "line 5: missing required field: Department");
    assert_eq!(lines.len(), 4);

    let csv_path = dir.path().join("report.CSV");
    write_report(&response.outcome, &csv_path).expect("write csv report");
    let csv_text = std::fs::read_to_string(&csv_path).expect("read csv report");
    assert_eq!(
        csv_text,
        render_csv_report(&response.outcome).expect("render csv")
    );

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("parse csv report");
    assert_eq!(records.len(), 3);
    assert_eq!(&records[1][0], "6");
    assert_eq!(&records[1][1], "RESOLUTION");
    assert_eq!(&records[1][2], "department not found: Physics");
}

#[tokio::test]
async fn test_config_list_shows_written_keys() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = ImportApi::new(db_path);

    assert!(api.list_config().expect("list config").is_empty());

    api.set_config(config_keys::MAX_SEMESTER, "10").expect("set max semester");
    api.set_config(config_keys::DEFAULT_PASSWORD, "Welcome@1")
        .expect("set default password");

    let entries = api.list_config().expect("list config");
    assert_eq!(
        entries,
        vec![
            (config_keys::DEFAULT_PASSWORD.to_string(), "Welcome@1".to_string()),
            (config_keys::MAX_SEMESTER.to_string(), "10".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_database_with_other_schema_version_is_rejected() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    {
        let conn = rusqlite::Connection::open(&db_path).expect("open db");
        conn.execute("DELETE FROM schema_version", []).expect("clear version");
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .expect("write old version");
    }

    let api = ImportApi::new(db_path);
    match api.list_departments() {
        Err(ApiError::DatabaseError(msg)) => {
            assert_eq!(msg, "unsupported schema version 1 (expected 2)")
        }
        other => panic!("expected schema version error, got {:?}", other.map(|d| d.len())),
    }
}
