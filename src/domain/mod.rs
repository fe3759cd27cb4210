// ==========================================
// 旧版数据迁移引擎 - 领域模型层
// ==========================================
// 职责: 定义字段值、记录、实体声明、导入结果
// 红线: 不含数据访问逻辑，不含导入流程逻辑
// ==========================================

pub mod entity;
pub mod outcome;
pub mod record;
pub mod value;

// 重导出核心类型
pub use entity::{EntitySpec, FieldSpec};
pub use outcome::{
    ImportOutcome, ImportSummary, InputStatus, SkipDetail, SkipReason, StoreRejectionKind,
};
pub use record::{RawRecord, Record, Rejection};
pub use value::{CoercedValue, FieldKind};
