// ==========================================
// 旧版数据迁移引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 目标库必须已存在（表结构由外部建好），不自动建库
// - 每个连接统一开启 foreign_keys，统一 busy_timeout
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use tracing::trace;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 打开已存在的 SQLite 库并应用统一配置（文件不存在即失败）
pub fn open_existing_connection(db_path: &Path, busy_timeout_ms: u64) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    conn.trace(Some(log_statement));
    Ok(conn)
}

fn log_statement(sql: &str) {
    trace!(target: "legacy_import::sql", "{}", sql);
}

/// 表是否存在
pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
            [table],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);
    Ok(found)
}
