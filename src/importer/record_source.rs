// ==========================================
// 旧版数据迁移引擎 - 记录来源 Trait
// ==========================================
// 职责: 为单个实体提供原始记录（不包含校验与落库）
// 实现者: CsvRecordSource（导出目录）, InMemoryRecordSource（测试/嵌入调用）
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::domain::record::RawRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;

/// 单个实体的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    /// 输入不存在（是否为错误由实体声明决定）
    Missing { location: String },
    Records {
        location: String,
        records: Vec<RawRecord>,
    },
}

// ==========================================
// RecordSource Trait
// ==========================================
pub trait RecordSource {
    /// 读取实体的全部原始记录
    ///
    /// # 返回
    /// - Ok(SourceInput::Missing): 输入不存在
    /// - Ok(SourceInput::Records): 已读取的记录（按文件顺序）
    /// - Err: 输入存在但无法读取
    fn load(&self, entity: &EntitySpec) -> ImportResult<SourceInput>;
}

// ==========================================
// InMemoryRecordSource
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    inputs: HashMap<String, Vec<RawRecord>>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, entity: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.inputs.insert(entity.into(), records);
        self
    }
}

impl RecordSource for InMemoryRecordSource {
    fn load(&self, entity: &EntitySpec) -> ImportResult<SourceInput> {
        let location = format!("memory:{}", entity.name);
        Ok(match self.inputs.get(&entity.name) {
            Some(records) => SourceInput::Records {
                location,
                records: records.clone(),
            },
            None => SourceInput::Missing { location },
        })
    }
}
