// ==========================================
// 旧版数据迁移引擎 - 存储网关 Trait
// ==========================================
// 职责: 唯一接触存储连接的边界
// 契约:
//   - 同一时刻至多一个进行中的事务
//   - 无事务时 execute / commit / rollback 为用法错误
//   - 事务进行中再次 begin 为用法错误
// 实现者: SqliteGateway
// ==========================================

use crate::domain::value::CoercedValue;
use crate::repository::dialect::SqlDialect;
use crate::repository::error::GatewayResult;

pub trait StoreGateway {
    fn dialect(&self) -> &dyn SqlDialect;

    fn begin_transaction(&mut self) -> GatewayResult<()>;

    /// 执行参数化语句（占位符为 `?`）
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数
    fn execute(&mut self, statement: &str, params: &[CoercedValue]) -> GatewayResult<usize>;

    fn commit(&mut self) -> GatewayResult<()>;

    fn rollback(&mut self) -> GatewayResult<()>;

    fn in_transaction(&self) -> bool;
}
