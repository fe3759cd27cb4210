// ==========================================
// 旧版数据迁移引擎 - 单记录工作单元
// ==========================================
// begin → work → commit
// 任意一步失败: 回滚（回滚失败仅记录日志），返回原始错误
// ==========================================

use crate::repository::error::GatewayResult;
use crate::repository::store_gateway::StoreGateway;
use tracing::error;

pub fn run_unit_of_work<G, T, F>(gateway: &mut G, work: F) -> GatewayResult<T>
where
    G: StoreGateway + ?Sized,
    F: FnOnce(&mut G) -> GatewayResult<T>,
{
    gateway.begin_transaction()?;

    let result = work(gateway).and_then(|value| gateway.commit().map(|()| value));

    if result.is_err() && gateway.in_transaction() {
        if let Err(rollback_err) = gateway.rollback() {
            error!(error = %rollback_err, "事务回滚失败");
        }
    }

    result
}
