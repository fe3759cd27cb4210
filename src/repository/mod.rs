// ==========================================
// 旧版数据迁移引擎 - 存储网关层
// ==========================================
// 红线: 唯一接触存储连接的层，不含导入流程逻辑
// 约束: 所有写入使用参数化语句
// ==========================================

pub mod dialect;
pub mod error;
pub mod identity_insert;
pub mod sqlite_gateway;
pub mod store_gateway;
pub mod unit_of_work;

// 重导出核心类型
pub use dialect::{MssqlDialect, SqlDialect, SqliteDialect};
pub use error::{GatewayError, GatewayResult};
pub use identity_insert::IdentityInsert;
pub use sqlite_gateway::SqliteGateway;
pub use store_gateway::StoreGateway;
pub use unit_of_work::run_unit_of_work;
