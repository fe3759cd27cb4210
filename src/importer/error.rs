// ==========================================
// 旧版数据迁移引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 输入读取失败 / 实体目录与依赖图非法
// 单条记录的拒绝不走此类型（见 domain::record::Rejection）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    // ===== 输入相关错误 =====
    #[error("文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("CSV 解析失败 ({path}): {message}")]
    CsvParseError { path: String, message: String },

    // ===== 实体目录错误 =====
    #[error("实体重复声明: {0}")]
    DuplicateEntity(String),

    #[error("实体 {entity} 依赖未声明的实体 {dependency}")]
    UnknownDependency { entity: String, dependency: String },

    #[error("实体依赖存在环: {}", .entities.join(" → "))]
    DependencyCycle { entities: Vec<String> },
}

impl ImportError {
    /// 输入相关错误对应的文件路径
    pub fn path(&self) -> Option<&str> {
        match self {
            ImportError::FileReadError { path, .. } | ImportError::CsvParseError { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
