// ==========================================
// 旧版数据迁移引擎 - 存储网关错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 唯一约束 / 外键 / 其他约束 / 语句 / 连接 / 用法
// ==========================================

use crate::domain::outcome::StoreRejectionKind;
use rusqlite::ErrorCode;
use thiserror::Error;

/// 存储网关错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    // ===== 连接错误 =====
    #[error("数据库连接失败 ({target}): {message}")]
    Connection { target: String, message: String },

    // ===== 用法错误 =====
    #[error("没有进行中的事务")]
    NoActiveTransaction,

    #[error("已有进行中的事务")]
    TransactionAlreadyOpen,

    // ===== 约束错误 =====
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error("约束违反: {0}")]
    ConstraintViolation(String),

    // ===== 语句错误 =====
    #[error("语句执行失败: {0}")]
    StatementError(String),
}

impl GatewayError {
    pub fn kind(&self) -> StoreRejectionKind {
        match self {
            GatewayError::Connection { .. } => StoreRejectionKind::Connection,
            GatewayError::NoActiveTransaction | GatewayError::TransactionAlreadyOpen => {
                StoreRejectionKind::Usage
            }
            GatewayError::UniqueConstraintViolation(_) => StoreRejectionKind::UniqueViolation,
            GatewayError::ForeignKeyViolation(_) => StoreRejectionKind::ForeignKeyViolation,
            GatewayError::ConstraintViolation(_) => StoreRejectionKind::ConstraintViolation,
            GatewayError::StatementError(_) => StoreRejectionKind::Statement,
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for GatewayError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg) => {
                let msg = msg.unwrap_or_else(|| code.to_string());
                if msg.contains("UNIQUE") || msg.contains("PRIMARY KEY") {
                    GatewayError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    GatewayError::ForeignKeyViolation(msg)
                } else if code.code == ErrorCode::ConstraintViolation {
                    GatewayError::ConstraintViolation(msg)
                } else {
                    GatewayError::StatementError(msg)
                }
            }
            _ => GatewayError::StatementError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type GatewayResult<T> = Result<T, GatewayError>;
