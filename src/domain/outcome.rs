// ==========================================
// 旧版数据迁移引擎 - 导入结果模型
// ==========================================
// ImportOutcome: 单个实体的导入统计（imported / skipped + 跳过明细）
// ImportSummary: 整次运行的汇总（对齐进程退出码）
// 红线: 跳过原因永不丢弃
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::domain::record::Rejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

// ==========================================
// StoreRejectionKind - 存储端拒绝分类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreRejectionKind {
    UniqueViolation,
    ForeignKeyViolation,
    ConstraintViolation,
    Statement,
    Connection,
    Usage,
}

// ==========================================
// SkipReason - 跳过原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum SkipReason {
    /// 强制转换/校验阶段拒绝（未访问存储）
    Rejected { rejection: Rejection },
    /// 存储端拒绝（事务已回滚）
    Store {
        kind: StoreRejectionKind,
        message: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Rejected { rejection } => write!(f, "{}", rejection),
            SkipReason::Store { message, .. } => write!(f, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDetail {
    pub row_number: usize,
    /// 源主键原文（若能读到）
    pub source_key: Option<String>,
    pub reason: SkipReason,
}

// ==========================================
// InputStatus - 实体输入状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InputStatus {
    Loaded { location: String, rows: usize },
    Missing { location: String, required: bool },
    Unreadable { location: String, error: String },
}

// ==========================================
// ImportOutcome - 单实体导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub entity: String,
    pub table: String,
    pub imported: usize,
    pub skipped: usize,
    pub skips: Vec<SkipDetail>,
    pub input: Option<InputStatus>,
}

impl ImportOutcome {
    pub fn new(entity: &EntitySpec) -> Self {
        Self {
            entity: entity.name.clone(),
            table: entity.table.clone(),
            imported: 0,
            skipped: 0,
            skips: Vec::new(),
            input: None,
        }
    }

    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_skip(&mut self, detail: SkipDetail) {
        self.skipped += 1;
        self.skips.push(detail);
    }

    pub fn with_input(mut self, input: InputStatus) -> Self {
        self.input = Some(input);
        self
    }

    pub fn processed(&self) -> usize {
        self.imported + self.skipped
    }
}

// ==========================================
// ImportSummary - 运行汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_imported: usize,
    pub total_skipped: usize,
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportSummary {
    pub fn new(
        run_id: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcomes: Vec<ImportOutcome>,
    ) -> Self {
        let total_imported = outcomes.iter().map(|o| o.imported).sum();
        let total_skipped = outcomes.iter().map(|o| o.skipped).sum();
        Self {
            run_id: run_id.into(),
            started_at,
            finished_at,
            total_imported,
            total_skipped,
            outcomes,
        }
    }

    pub fn outcome(&self, entity: &str) -> Option<&ImportOutcome> {
        self.outcomes.iter().find(|o| o.entity == entity)
    }

    /// 至少导入一条记录即视为成功；单条跳过不影响结果
    pub fn is_success(&self) -> bool {
        self.total_imported > 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// 文本汇总（打印到 stdout）
    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "导入完成 (run_id={})", self.run_id);
        let _ = writeln!(out, "{}", rule);
        for (idx, outcome) in self.outcomes.iter().enumerate() {
            let note = match &outcome.input {
                Some(InputStatus::Missing { required: true, .. }) => " [输入文件缺失]",
                Some(InputStatus::Missing { required: false, .. }) => " [无输入文件]",
                Some(InputStatus::Unreadable { .. }) => " [输入文件不可读]",
                _ => "",
            };
            let _ = writeln!(
                out,
                "{}. {:<14} {:<10} 导入: {:>6}  跳过: {:>6}{}",
                idx + 1,
                outcome.entity,
                outcome.table,
                outcome.imported,
                outcome.skipped,
                note
            );
        }
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "成功导入: {} 条", self.total_imported);
        let _ = writeln!(out, "跳过: {} 条", self.total_skipped);
        let _ = write!(out, "{}", rule);
        out
    }
}
