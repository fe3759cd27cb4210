// ==========================================
// 旧版数据迁移引擎 - 保留原主键的插入语句
// ==========================================
// 顺序: 开启显式标识 → INSERT → 关闭显式标识
// 红线: 关闭语句无论 INSERT 成败都要执行（SQL Server 上该开关作用于会话）
// ==========================================

use crate::domain::entity::EntitySpec;
use crate::domain::record::Record;
use crate::repository::dialect::SqlDialect;
use crate::repository::error::GatewayResult;
use crate::repository::store_gateway::StoreGateway;
use tracing::debug;

/// 单个实体的插入语句组（每实体构建一次，逐条复用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityInsert {
    pub table: String,
    pub enable: Option<String>,
    pub insert: String,
    pub disable: Option<String>,
}

impl IdentityInsert {
    pub fn for_entity(entity: &EntitySpec, dialect: &dyn SqlDialect) -> Self {
        let table = dialect.qualify(&entity.schema, &entity.table);
        let columns = entity.insert_columns();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let now = dialect.current_timestamp();

        let insert = format!(
            "INSERT INTO {} ({}, {}, {}) VALUES ({}, {}, {})",
            table,
            columns.join(", "),
            entity.created_column,
            entity.updated_column,
            placeholders,
            now,
            now
        );

        Self {
            enable: dialect.identity_insert(&table, true),
            disable: dialect.identity_insert(&table, false),
            insert,
            table,
        }
    }

    /// 在当前事务中写入一条记录
    pub fn insert_record<G>(&self, gateway: &mut G, record: &Record) -> GatewayResult<()>
    where
        G: StoreGateway + ?Sized,
    {
        if let Some(enable) = &self.enable {
            gateway.execute(enable, &[])?;
        }

        debug!(table = %self.table, identity = record.identity, sql = %self.insert, "执行 INSERT");
        let inserted = gateway.execute(&self.insert, record.values());

        let disabled = match &self.disable {
            Some(disable) => gateway.execute(disable, &[]).map(|_| ()),
            None => Ok(()),
        };

        // INSERT 的错误优先于关闭语句的错误
        inserted?;
        disabled
    }
}
