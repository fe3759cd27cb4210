// ==========================================
// 旧版数据迁移引擎 - 配置校验
// ==========================================
// 在连接存储之前执行；任一失败即为致命错误
// ==========================================

use crate::config::migration_config::{ConfigError, ConfigResult, MigrationConfig};
use crate::importer::entity_catalog::EntityCatalog;

pub fn validate_config(config: &MigrationConfig, catalog: &EntityCatalog) -> ConfigResult<()> {
    if config.store.database_path.as_os_str().is_empty() {
        return Err(invalid("store.database_path", "路径为空"));
    }
    if config.store.schema.trim().is_empty() {
        return Err(invalid("store.schema", "schema 为空"));
    }
    if config.input.directory.as_os_str().is_empty() {
        return Err(invalid("input.directory", "目录为空"));
    }
    if matches!(&config.report_path, Some(p) if p.as_os_str().is_empty()) {
        return Err(invalid("report_path", "路径为空"));
    }

    for (entity, file) in &config.input.files {
        if catalog.get(entity).is_none() {
            return Err(ConfigError::UnknownEntityOverride(entity.clone()));
        }
        if file.trim().is_empty() {
            return Err(invalid(&format!("input.files.{}", entity), "文件名为空"));
        }
    }

    Ok(())
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
