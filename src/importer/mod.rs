// ==========================================
// 旧版数据迁移引擎 - 导入层
// ==========================================
// 职责: 原始记录读取 → 强制转换 → 校验 → 逐条落库 → 汇总
// 支持: CSV 导出目录, 内存记录
// ==========================================

// 模块声明
pub mod dependency_graph;
pub mod entity_catalog;
pub mod error;
pub mod field_coercion;
pub mod file_parser;
pub mod orchestrator;
pub mod record_source;
pub mod record_validator;
pub mod table_importer;

// 重导出核心类型
pub use dependency_graph::ImportPlan;
pub use entity_catalog::{EntityCatalog, DEFAULT_SCHEMA};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, CsvRecordSource};
pub use orchestrator::{missing_required_input, ImportOrchestrator};
pub use record_source::{InMemoryRecordSource, RecordSource, SourceInput};
pub use record_validator::RecordValidator;
pub use table_importer::TableImporter;
