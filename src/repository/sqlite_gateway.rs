// ==========================================
// 旧版数据迁移引擎 - SQLite 存储网关
// ==========================================
// 职责: 以 rusqlite 实现 StoreGateway
// 事务状态直接取自连接（autocommit 即无事务）
// ==========================================

use crate::config::StoreConfig;
use crate::db::{open_existing_connection, table_exists};
use crate::domain::value::{CoercedValue, TIMESTAMP_FORMAT};
use crate::repository::dialect::{SqlDialect, SqliteDialect};
use crate::repository::error::{GatewayError, GatewayResult};
use crate::repository::store_gateway::StoreGateway;
use rusqlite::types::{Null, ToSqlOutput};
use rusqlite::{params_from_iter, Connection, ToSql};
use tracing::{debug, info};

// ==========================================
// CoercedValue → SQLite 参数
// ==========================================
impl ToSql for CoercedValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CoercedValue::Integer(v) => ToSqlOutput::from(*v),
            CoercedValue::Text(v) => ToSqlOutput::from(v.as_str()),
            CoercedValue::Timestamp(v) => ToSqlOutput::from(v.format(TIMESTAMP_FORMAT).to_string()),
            CoercedValue::Boolean(v) => ToSqlOutput::from(*v),
            CoercedValue::Null => ToSqlOutput::from(Null),
        })
    }
}

pub struct SqliteGateway {
    conn: Connection,
    dialect: SqliteDialect,
}

impl SqliteGateway {
    /// 连接目标库
    ///
    /// # 返回
    /// - Err(GatewayError::Connection): 文件不存在 / 无法打开 / PRAGMA 失败
    pub fn connect(config: &StoreConfig) -> GatewayResult<Self> {
        let target = config.database_path.display().to_string();
        let conn = open_existing_connection(&config.database_path, config.busy_timeout_ms)
            .map_err(|e| GatewayError::Connection {
                target: target.clone(),
                message: e.to_string(),
            })?;
        info!(target = %target, "已连接目标库");
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            dialect: SqliteDialect,
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn table_exists(&self, table: &str) -> GatewayResult<bool> {
        Ok(table_exists(&self.conn, table)?)
    }

    fn require_transaction(&self) -> GatewayResult<()> {
        if self.conn.is_autocommit() {
            Err(GatewayError::NoActiveTransaction)
        } else {
            Ok(())
        }
    }
}

impl StoreGateway for SqliteGateway {
    fn dialect(&self) -> &dyn SqlDialect {
        &self.dialect
    }

    fn begin_transaction(&mut self) -> GatewayResult<()> {
        if !self.conn.is_autocommit() {
            return Err(GatewayError::TransactionAlreadyOpen);
        }
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn execute(&mut self, statement: &str, params: &[CoercedValue]) -> GatewayResult<usize> {
        self.require_transaction()?;
        let affected = self.conn.execute(statement, params_from_iter(params.iter()))?;
        debug!(affected, "语句执行完成");
        Ok(affected)
    }

    fn commit(&mut self) -> GatewayResult<()> {
        self.require_transaction()?;
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> GatewayResult<()> {
        self.require_transaction()?;
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}
