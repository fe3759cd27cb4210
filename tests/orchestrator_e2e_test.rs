// ==========================================
// 端到端导入测试
// ==========================================
// 测试目标: CSV 导出目录 → 依赖顺序导入 → 运行汇总
// ==========================================


use legacy_import::config::{validate_config, MigrationConfig};
use legacy_import::importer::{
    missing_required_input, CsvRecordSource, EntityCatalog, ImportOrchestrator, ImportPlan,
};
use legacy_import::logging;
use legacy_import::repository::SqliteGateway;
use legacy_import::{GatewayError, InputStatus, SkipReason, StoreRejectionKind};
use tempfile::TempDir;
use test_helpers::{count_rows, create_test_db, open_gateway, store_config, write_csv, write_full_export};

fn plan() -> ImportPlan {
    ImportPlan::from_catalog(&EntityCatalog::builtin("ags")).unwrap()
}

#[test]
fn test_full_export_imports_every_entity() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_full_export(input.path());
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );

    assert_eq!(summary.total_imported, 10);
    assert_eq!(summary.total_skipped, 0);
    assert_eq!(summary.exit_code(), 0);

    let conn = gateway.connection();
    assert_eq!(count_rows(conn, "ra_ft_st"), 2);
    assert_eq!(count_rows(conn, "ra_ft_s"), 2);
    assert_eq!(count_rows(conn, "ra_ft_sn"), 1);
    assert_eq!(count_rows(conn, "ra_a"), 2);
    assert_eq!(count_rows(conn, "ra_f"), 3);

    let name: String = conn
        .query_row("SELECT st_name FROM ra_ft_st WHERE st_key = 1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(name, "Отчёт");

    let add_ra: bool = conn
        .query_row("SELECT adt_AddRA FROM ra_a WHERE adt_key = 11", [], |r| r.get(0))
        .unwrap();
    assert!(!add_ra);

    let (execute, source): (bool, Option<bool>) = conn
        .query_row("SELECT af_execute, af_source FROM ra_f WHERE af_key = 2", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert!(!execute);
    assert_eq!(source, Some(true));

    let text = summary.render();
    assert!(text.contains("成功导入: 10 条"));
}

#[test]
fn test_missing_optional_inputs_are_empty_sets() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_csv(
        input.path(),
        "ra_f_export.csv",
        "af_key,af_name,af_dir,af_type\n1,a.xlsx,4,2\n",
    );
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );

    assert_eq!(summary.total_imported, 1);
    for name in ["source_type", "source_sheet", "source_name", "revision"] {
        let outcome = summary.outcome(name).unwrap();
        assert_eq!(outcome.processed(), 0);
        assert!(matches!(
            outcome.input,
            Some(InputStatus::Missing { required: false, .. })
        ));
    }
}

#[test]
fn test_missing_required_input_still_runs_other_entities() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_csv(input.path(), "ra_ft_st_export.csv", "key,name\n1,Report\n");
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );

    assert!(missing_required_input(summary.outcome("file_record").unwrap()));
    assert_eq!(summary.outcome("source_type").unwrap().imported, 1);
    assert_eq!(summary.exit_code(), 0);
    assert!(summary.render().contains("[输入文件缺失]"));
}

#[test]
fn test_nothing_imported_signals_failure() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    // 唯一一条记录缺少必填字段
    write_csv(input.path(), "ra_f_export.csv", "af_key,af_dir,af_type\n1,4,2\n");
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );

    assert_eq!(summary.total_imported, 0);
    assert_eq!(summary.total_skipped, 1);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_rerun_is_idempotent() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_full_export(input.path());
    let source = CsvRecordSource::new(input.path());
    let mut gateway = open_gateway(&db_path);

    let first = ImportOrchestrator::new().run_import(&plan(), &source, &mut gateway);
    let second = ImportOrchestrator::new().run_import(&plan(), &source, &mut gateway);

    assert_eq!(second.total_imported, 0);
    assert_eq!(second.total_skipped, first.total_imported);
    assert_ne!(first.run_id, second.run_id);
    assert_eq!(second.exit_code(), 1);
    assert_eq!(count_rows(gateway.connection(), "ra_f"), 3);
}

#[test]
fn test_file_record_with_unknown_revision_is_skipped() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_csv(
        input.path(),
        "ra_f_export.csv",
        "af_key,af_name,af_dir,af_type,af_adt_key\n1,a.xlsx,4,2,\n2,b.xlsx,4,2,99\n",
    );
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );

    let outcome = summary.outcome("file_record").unwrap();
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.skips[0].source_key.as_deref(), Some("2"));
    assert!(matches!(
        outcome.skips[0].reason,
        SkipReason::Store {
            kind: StoreRejectionKind::ForeignKeyViolation,
            ..
        }
    ));
}

#[test]
fn test_config_file_overrides_are_honoured() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_csv(
        input.path(),
        "files.csv",
        "\u{feff}af_key,af_name,af_dir,af_type\n1,a.xlsx,4,2\n",
    );

    let mut config = MigrationConfig::default();
    config.store = store_config(&db_path);
    config.input.directory = input.path().to_path_buf();
    config
        .input
        .files
        .insert("file_record".to_string(), "files.csv".to_string());
    let catalog = EntityCatalog::builtin(&config.store.schema);
    validate_config(&config, &catalog).unwrap();

    let mut gateway = SqliteGateway::connect(&config.store).unwrap();
    let summary = ImportOrchestrator::new().run_import(
        &ImportPlan::from_catalog(&catalog).unwrap(),
        &CsvRecordSource::from_config(&config.input),
        &mut gateway,
    );

    assert_eq!(summary.outcome("file_record").unwrap().imported, 1);
}

#[test]
fn test_connection_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir.path().join("missing.db"));

    let err = SqliteGateway::connect(&config).err().unwrap();

    assert!(matches!(err, GatewayError::Connection { .. }));
    assert!(!dir.path().join("missing.db").exists());
}

#[test]
fn test_summary_serializes_to_json_report() {
    logging::init_test();
    let (_db_dir, db_path) = create_test_db().unwrap();
    let input = TempDir::new().unwrap();
    write_full_export(input.path());
    let mut gateway = open_gateway(&db_path);

    let summary = ImportOrchestrator::new().run_import(
        &plan(),
        &CsvRecordSource::new(input.path()),
        &mut gateway,
    );
    let report = serde_json::to_value(&summary).unwrap();

    assert_eq!(report["total_imported"], 10);
    assert_eq!(report["outcomes"].as_array().map(Vec::len), Some(5));
    assert_eq!(report["outcomes"][0]["input"]["status"], "loaded");
}
