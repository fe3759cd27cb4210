// ==========================================
// 旧版数据迁移引擎 - SQL 方言
// ==========================================
// 职责: 表名限定 / 显式标识插入开关 / 当前时间表达式
// 实现者: MssqlDialect（原目标库）, SqliteDialect（内置网关）
// MssqlDialect 为外部 SQL Server 网关的参考方言，本 crate 不提供该网关
// ==========================================

pub trait SqlDialect {
    /// 限定表名
    fn qualify(&self, schema: &str, table: &str) -> String;

    /// 开启/关闭显式标识插入；不需要时返回 None
    fn identity_insert(&self, qualified_table: &str, enabled: bool) -> Option<String>;

    /// 存储端当前时间表达式（审计列）
    fn current_timestamp(&self) -> &'static str;
}

// ==========================================
// MssqlDialect
// ==========================================
// IDENTITY_INSERT 作用于会话且不随事务回滚
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl SqlDialect for MssqlDialect {
    fn qualify(&self, schema: &str, table: &str) -> String {
        if schema.is_empty() {
            table.to_string()
        } else {
            format!("{}.{}", schema, table)
        }
    }

    fn identity_insert(&self, qualified_table: &str, enabled: bool) -> Option<String> {
        let state = if enabled { "ON" } else { "OFF" };
        Some(format!("SET IDENTITY_INSERT {} {}", qualified_table, state))
    }

    fn current_timestamp(&self) -> &'static str {
        "GETDATE()"
    }
}

// ==========================================
// SqliteDialect
// ==========================================
// 单库文件无 schema 前缀；INTEGER PRIMARY KEY 可直接写入原主键
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn qualify(&self, _schema: &str, table: &str) -> String {
        table.to_string()
    }

    fn identity_insert(&self, _qualified_table: &str, _enabled: bool) -> Option<String> {
        None
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }
}
