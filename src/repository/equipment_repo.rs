// ==========================================
// 治具使用监控系统 - 治具使用记录读取仓储
// ==========================================
// 数据来源: masterlist LEFT JOIN transaction_incoming
// 红线: 只读,不做分级与汇总
// ==========================================

use crate::domain::equipment::{EquipmentRecord, REMARKS_NO_TRANSACTION};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// EquipmentRepository
// ==========================================
pub struct EquipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EquipmentRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 全部治具的使用记录（含无交易的治具）
    ///
    /// 无入库交易时 usage_count=0, remarks="NO TRANSACTION"
    pub fn list_equipment(&self, default_limit: i64) -> RepositoryResult<Vec<EquipmentRecord>> {
        self.query_records("LEFT JOIN", default_limit)
    }

    /// 仅有入库交易的治具
    pub fn list_transacted(&self, default_limit: i64) -> RepositoryResult<Vec<EquipmentRecord>> {
        self.query_records("INNER JOIN", default_limit)
    }

    fn query_records(&self, join: &str, default_limit: i64) -> RepositoryResult<Vec<EquipmentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT m.serial_number, m.item_description, m.customer, m.model, m.area,
                   COALESCE(t.usage_count, 0),
                   COALESCE(t.remarks, ?1)
            FROM masterlist m
            {join} transaction_incoming t ON t.item_id = m.item_id
            ORDER BY m.item_id DESC
            "#,
            join = join
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![REMARKS_NO_TRANSACTION], |row| map_record(row, default_limit))?
            .collect::<SqliteResult<Vec<_>>>()?;

        tracing::debug!(join = join, count = records.len(), "读取治具使用记录");
        Ok(records)
    }
}

fn map_record(row: &Row<'_>, default_limit: i64) -> SqliteResult<EquipmentRecord> {
    Ok(EquipmentRecord {
        serial: row.get(0)?,
        item_description: row.get(1)?,
        customer: row.get(2)?,
        model: row.get(3)?,
        area: row.get(4)?,
        usage_count: row.get(5)?,
        limit: default_limit,
        remarks: row.get(6)?,
    })
}
