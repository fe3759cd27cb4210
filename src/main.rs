// ==========================================
// 旧版数据迁移引擎 - 命令行主入口
// ==========================================
// 退出码:
//   0 - 至少导入一条记录
//   1 - 未导入任何记录
//   2 - 致命错误（配置 / 实体目录 / 连接）
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use legacy_import::config::{validate_config, CliArgs, MigrationConfig};
use legacy_import::importer::{CsvRecordSource, EntityCatalog, ImportOrchestrator, ImportPlan};
use legacy_import::repository::SqliteGateway;
use legacy_import::{logging, ImportSummary, APP_NAME, EXIT_FATAL, VERSION};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    let args = CliArgs::parse();

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!(error = %format!("{:#}", err), "迁移中止");
            eprintln!("错误: {:#}", err);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    info!("==================================================");
    info!("{} v{}", APP_NAME, VERSION);
    info!("==================================================");

    // 配置: 文件 → 环境变量 → 命令行
    let mut config = MigrationConfig::load(args.config.as_deref()).context("加载配置失败")?;
    args.apply_to(&mut config);

    let catalog = EntityCatalog::builtin(&config.store.schema);
    validate_config(&config, &catalog).context("配置校验失败")?;
    let plan = ImportPlan::from_catalog(&catalog).context("实体依赖图非法")?;

    info!(db = %config.store.database_path.display(), "使用数据库");
    info!(dir = %config.input.directory.display(), "导出文件目录");

    let mut gateway = SqliteGateway::connect(&config.store).context("无法连接目标库")?;

    for entity in plan.steps() {
        match gateway.table_exists(&entity.table) {
            Ok(true) => {}
            Ok(false) => warn!(table = %entity.table, "目标表不存在，该实体的记录将全部被拒绝"),
            Err(err) => warn!(table = %entity.table, error = %err, "无法检查目标表"),
        }
    }

    let source = CsvRecordSource::from_config(&config.input);
    let summary = ImportOrchestrator::new().run_import(&plan, &source, &mut gateway);

    println!("{}", summary.render());

    // 报告写入失败不影响退出码
    if let Some(path) = &config.report_path {
        match write_report(path, &summary) {
            Ok(()) => info!(path = %path.display(), "运行报告已写入"),
            Err(err) => error!(path = %path.display(), error = %format!("{:#}", err), "运行报告写入失败"),
        }
    }

    if !summary.is_success() {
        warn!("未导入任何记录");
    }
    Ok(summary.exit_code())
}

fn write_report(path: &Path, summary: &ImportSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("序列化运行报告失败")?;
    std::fs::write(path, json).with_context(|| format!("写入 {} 失败", path.display()))?;
    Ok(())
}
