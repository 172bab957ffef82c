// ==========================================
// 治具使用监控系统 - 出入库交易仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 同一序列号 UPSERT（后写生效）
// ==========================================

use crate::domain::transaction::{JigTransaction, TransactionDirection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

/// 交易时间存储格式
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ==========================================
// TransactionRepository - 出入库交易仓储
// ==========================================
pub struct TransactionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TransactionRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入交易（按序列号覆盖）
    ///
    /// # 参数
    /// - `item_id`: masterlist.item_id
    /// - `txn`: 交易记录,方向决定写入哪张表
    pub fn upsert(&self, item_id: i64, txn: &JigTransaction) -> RepositoryResult<()> {
        let transaction_date = txn
            .transaction_date
            .ok_or_else(|| RepositoryError::FieldValueError {
                field: "transaction_date".to_string(),
                message: "交易时间不能为空".to_string(),
            })?
            .format(DATETIME_FORMAT)
            .to_string();

        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            INSERT INTO {table} (
                item_id, serial_number, item_description, customer, model,
                area, line, usage_count, status, remarks, transaction_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(serial_number) DO UPDATE SET
                item_id = excluded.item_id,
                item_description = excluded.item_description,
                customer = excluded.customer,
                model = excluded.model,
                area = excluded.area,
                line = excluded.line,
                usage_count = excluded.usage_count,
                status = excluded.status,
                remarks = excluded.remarks,
                transaction_date = excluded.transaction_date
            "#,
            table = txn.direction.table_name()
        );

        conn.execute(
            &sql,
            params![
                item_id,
                txn.serial_number,
                txn.item_description,
                txn.customer,
                txn.model,
                txn.area,
                txn.line,
                txn.usage_count,
                txn.status,
                txn.remarks,
                transaction_date,
            ],
        )?;
        Ok(())
    }

    /// 查询序列号最近一次入库的使用次数
    pub fn latest_incoming_usage(&self, serial: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let usage = conn
            .query_row(
                r#"
                SELECT usage_count FROM transaction_incoming
                WHERE serial_number = ?1
                ORDER BY transaction_date DESC
                LIMIT 1
                "#,
                params![serial],
                |row| row.get(0),
            )
            .optional()?;
        Ok(usage)
    }

    /// 按方向查询全部交易（最近在前）
    pub fn list(&self, direction: TransactionDirection) -> RepositoryResult<Vec<JigTransaction>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT item_id, serial_number, item_description, customer, model,
                   area, line, usage_count, status, remarks, transaction_date
            FROM {table}
            ORDER BY transaction_date DESC, transaction_id DESC
            "#,
            table = direction.table_name()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(JigTransaction {
                    direction,
                    item_id: row.get(0)?,
                    serial_number: row.get(1)?,
                    item_description: row.get(2)?,
                    customer: row.get(3)?,
                    model: row.get(4)?,
                    area: row.get(5)?,
                    line: row.get(6)?,
                    usage_count: row.get(7)?,
                    status: row.get(8)?,
                    remarks: row.get(9)?,
                    transaction_date: NaiveDateTime::parse_from_str(
                        &row.get::<_, String>(10)?,
                        DATETIME_FORMAT,
                    )
                    .ok(),
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }
}
