// ==========================================
// 旧版数据迁移引擎 - 记录模型
// ==========================================
// RawRecord: 导入管道输入（文件解析 → 此结构）
// Record:    校验通过、可直接落库的强类型记录
// Rejection: 校验拒绝原因
// 生命周期: 仅在单条记录处理期间存在
// ==========================================

use crate::domain::value::{CoercedValue, FieldKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// RawRecord - 原始行记录
// ==========================================
// 有序映射: 列名 → 原始文本（None 表示该列无值）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    row_number: usize,
    fields: Vec<(String, Option<String>)>,
}

impl RawRecord {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            fields: Vec::new(),
        }
    }

    /// 由 (列名, 值) 对构造，所有值视为存在
    pub fn from_pairs<'a, I>(row_number: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut record = Self::new(row_number);
        for (name, value) in pairs {
            record.push(name, Some(value.to_string()));
        }
        record
    }

    /// 追加一列；同名列再次出现时以首次出现为准
    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if self.contains(&name) {
            return;
        }
        self.fields.push((name, value));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// 查询单列
    ///
    /// # 返回
    /// - None: 列不存在
    /// - Some(None): 列存在但无值
    /// - Some(Some(v)): 列存在且有值
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    /// 按别名顺序解析：第一个存在的列名胜出
    pub fn resolve<'a, I>(&self, names: I) -> Option<Option<&str>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().find_map(|name| self.get(name))
    }

    /// 所有列均无值（或仅含空白）
    pub fn is_blank(&self) -> bool {
        self.fields
            .iter()
            .all(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

// ==========================================
// Record - 校验后的强类型记录
// ==========================================
// 列顺序与 EntitySpec::all_fields() 一致（标识列在首位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub row_number: usize,
    pub identity: i64,
    columns: Vec<String>,
    values: Vec<CoercedValue>,
}

impl Record {
    pub fn new(
        entity: impl Into<String>,
        row_number: usize,
        identity: i64,
        columns: Vec<String>,
        values: Vec<CoercedValue>,
    ) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self {
            entity: entity.into(),
            row_number,
            identity,
            columns,
            values,
        }
    }

    pub fn get(&self, column: &str) -> Option<&CoercedValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 按列顺序排列的参数值（用于参数化 INSERT）
    pub fn values(&self) -> &[CoercedValue] {
        &self.values
    }
}

// ==========================================
// Rejection - 校验拒绝
// ==========================================
// 两种情况都视为"必填字段缺失"，区别仅在于提示信息
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    #[error("必填字段缺失: {field}")]
    MissingField { field: String },

    #[error("必填字段无法解析 (字段 {field}, 期望{expected}): {value}")]
    Malformed {
        field: String,
        value: String,
        expected: FieldKind,
    },
}

impl Rejection {
    pub fn field(&self) -> &str {
        match self {
            Rejection::MissingField { field } => field,
            Rejection::Malformed { field, .. } => field,
        }
    }
}
