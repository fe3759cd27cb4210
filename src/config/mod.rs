// ==========================================
// 旧版数据迁移引擎 - 配置层
// ==========================================
// 职责: 运行配置加载、覆写、校验；命令行参数
// 存储: JSON 文件 + 环境变量
// ==========================================

pub mod cli;
pub mod migration_config;
pub mod validation;

// 重导出核心配置
pub use cli::CliArgs;
pub use migration_config::{
    default_database_path, ConfigError, ConfigResult, InputConfig, MigrationConfig, StoreConfig,
    ENV_DB_PATH, ENV_INPUT_DIR,
};
pub use validation::validate_config;
