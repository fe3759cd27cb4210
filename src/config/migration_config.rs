// ==========================================
// 旧版数据迁移引擎 - 运行配置
// ==========================================
// 来源优先级: 命令行 > 环境变量 > 配置文件(JSON) > 默认值
// 存储: 单个 JSON 文件（可选）
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use crate::importer::entity_catalog::DEFAULT_SCHEMA;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// 环境变量: 目标库路径
pub const ENV_DB_PATH: &str = "LEGACY_IMPORT_DB_PATH";
/// 环境变量: 导出文件目录
pub const ENV_INPUT_DIR: &str = "LEGACY_IMPORT_INPUT_DIR";

const DEFAULT_INPUT_DIR: &str = "/tmp";
const DB_FILE_NAME: &str = "legacy_import.db";
const DATA_DIR_NAME: &str = "legacy-import";

// ==========================================
// ConfigError
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("输入文件覆盖指向未知实体: {0}")]
    UnknownEntityOverride(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// StoreConfig - 目标存储
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub schema: String,
    pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            schema: DEFAULT_SCHEMA.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

// ==========================================
// InputConfig - 导出文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    /// 逻辑名 → 文件名
    pub files: BTreeMap<String, String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_INPUT_DIR),
            files: BTreeMap::new(),
        }
    }
}

// ==========================================
// MigrationConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub store: StoreConfig,
    pub input: InputConfig,
    pub report_path: Option<PathBuf>,
}

impl MigrationConfig {
    /// 加载配置并应用进程环境变量
    ///
    /// # 参数
    /// - path: 配置文件路径；None 表示仅使用默认值
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let location = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: location.clone(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&raw).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: location.clone(),
                message,
            },
            other => other,
        })?;
        info!(path = %location, "已加载配置文件");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆盖（lookup 便于测试注入）
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_blank(lookup(ENV_DB_PATH)) {
            self.store.database_path = PathBuf::from(path);
        }
        if let Some(dir) = non_blank(lookup(ENV_INPUT_DIR)) {
            self.input.directory = PathBuf::from(dir);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认目标库路径: 用户数据目录，取不到时回退到当前目录
pub fn default_database_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(DATA_DIR_NAME).join(DB_FILE_NAME),
        None => PathBuf::from(".").join(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MigrationConfig::default();

        assert_eq!(config.store.schema, "ags");
        assert_eq!(config.store.busy_timeout_ms, 5_000);
        assert_eq!(config.input.directory, PathBuf::from("/tmp"));
        assert!(config.store.database_path.ends_with("legacy_import.db"));
        assert_eq!(config.report_path, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MigrationConfig::from_json(
            r#"{"store": {"database_path": "/data/target.db"},
                "input": {"files": {"file_record": "files.csv"}}}"#,
        )
        .unwrap();

        assert_eq!(config.store.database_path, PathBuf::from("/data/target.db"));
        assert_eq!(config.store.schema, "ags");
        assert_eq!(config.input.directory, PathBuf::from("/tmp"));
        assert_eq!(config.input.files.get("file_record").map(String::as_str), Some("files.csv"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = MigrationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { path: p, .. } if p == path.display().to_string()));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = MigrationConfig::from_file(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_DB_PATH, " /srv/legacy.db "), (ENV_INPUT_DIR, "")]
            .into_iter()
            .collect();
        let mut config = MigrationConfig::default();

        config.apply_env_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.database_path, PathBuf::from("/srv/legacy.db"));
        // 空值不覆盖
        assert_eq!(config.input.directory, PathBuf::from("/tmp"));
    }
}
