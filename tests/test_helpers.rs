// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据写入等功能
// ==========================================

use jig_monitoring::db::{init_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是合法 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 直接写入一条主数据,返回 item_id
pub fn insert_masterlist_row(
    conn: &Connection,
    serial: &str,
    description: &str,
    customer: &str,
    area: &str,
) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO masterlist (
            serial_number, stock_control, item_description, customer,
            model, area, line, remarks, status
        ) VALUES (?1, 'SC-1', ?2, ?3, 'M1', ?4, 'L1', 'GOOD', 'ACTIVE')
        "#,
        params![serial, description, customer, area],
    )?;
    Ok(conn.last_insert_rowid())
}

/// 直接写入一条入库交易
pub fn insert_incoming_row(
    conn: &Connection,
    item_id: i64,
    serial: &str,
    usage_count: i64,
    remarks: &str,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO transaction_incoming (
            item_id, serial_number, usage_count, status, remarks, transaction_date
        ) VALUES (?1, ?2, ?3, 'IN', ?4, datetime('now'))
        "#,
        params![item_id, serial, usage_count, remarks],
    )?;
    Ok(())
}
