// ==========================================
// 旧版数据迁移引擎 - 字段值类型
// ==========================================
// 职责: 定义强类型字段值（强制转换的输出）与字段种类
// 红线: 纯数据结构，不含解析逻辑
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 日期时间文本格式（落库参数与展示共用）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// FieldKind - 目标列类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Text,
    Timestamp,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "整数",
            FieldKind::Text => "文本",
            FieldKind::Timestamp => "日期时间",
            FieldKind::Boolean => "布尔",
        };
        f.write_str(name)
    }
}

// ==========================================
// CoercedValue - 强制转换后的字段值
// ==========================================
// 说明: Null 表示"缺失或无法解析"，与 Boolean(false) 严格区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CoercedValue {
    Integer(i64),
    Text(String),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    Null,
}

impl CoercedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CoercedValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CoercedValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CoercedValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            CoercedValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CoercedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercedValue::Integer(v) => write!(f, "{}", v),
            CoercedValue::Text(v) => write!(f, "{}", v),
            CoercedValue::Timestamp(v) => write!(f, "{}", v.format(TIMESTAMP_FORMAT)),
            CoercedValue::Boolean(v) => write!(f, "{}", v),
            CoercedValue::Null => f.write_str("NULL"),
        }
    }
}
