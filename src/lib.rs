// ==========================================
// 旧版数据迁移引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (rusqlite)
// 系统定位: 一次性迁移工具（逐条事务，保留原主键）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 字段值 / 记录 / 实体声明 / 导入结果
pub mod domain;

// 存储网关层 - 方言 / 事务 / 插入
pub mod repository;

// 导入层 - 强制转换 / 校验 / 依赖图 / 编排
pub mod importer;

// 配置层 - 运行配置与命令行
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CoercedValue, EntitySpec, FieldKind, FieldSpec, ImportOutcome, ImportSummary, InputStatus,
    RawRecord, Record, Rejection, SkipDetail, SkipReason, StoreRejectionKind,
};

// 导入
pub use importer::{
    CsvRecordSource, EntityCatalog, ImportError, ImportOrchestrator, ImportPlan, RecordSource,
    RecordValidator, TableImporter,
};

// 存储网关
pub use repository::{GatewayError, SqlDialect, SqliteGateway, StoreGateway};

// 配置
pub use config::{CliArgs, ConfigError, MigrationConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "旧版数据迁移引擎";

/// 致命错误（配置 / 实体目录 / 连接）对应的退出码
pub const EXIT_FATAL: u8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let now = chrono::Utc::now();
        let empty = ImportSummary::new("run", now, now, Vec::new());
        assert_ne!(empty.exit_code(), EXIT_FATAL);
        assert_eq!(empty.exit_code(), 1);
    }
}
