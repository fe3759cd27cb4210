// ==========================================
// 旧版数据迁移引擎 - 命令行参数
// ==========================================

use crate::config::migration_config::MigrationConfig;
use clap::Parser;
use std::path::PathBuf;

/// 将旧版桌面数据库的 CSV 导出迁移到关系型存储（保留原主键）
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "legacy-import", author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON 配置文件
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 运行报告输出路径（JSON）
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// 目标库文件（覆盖配置与环境变量）
    #[arg(long = "db", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// 导出文件目录（覆盖配置与环境变量）
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,
}

impl CliArgs {
    /// 命令行参数优先级最高
    pub fn apply_to(&self, config: &mut MigrationConfig) {
        if let Some(report) = &self.report {
            config.report_path = Some(report.clone());
        }
        if let Some(database) = &self.database {
            config.store.database_path = database.clone();
        }
        if let Some(dir) = &self.input_dir {
            config.input.directory = dir.clone();
        }
    }
}
