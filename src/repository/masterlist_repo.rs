// ==========================================
// 治具使用监控系统 - 治具主数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::masterlist::{MasterlistItem, SerialLookup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    item_id, serial_number, stock_control, item_description, customer,
    model, area, line, COALESCE(remarks, ''), COALESCE(status, '')
"#;

fn map_item(row: &Row<'_>) -> SqliteResult<MasterlistItem> {
    Ok(MasterlistItem {
        item_id: row.get(0)?,
        serial_number: row.get(1)?,
        stock_control: row.get(2)?,
        item_description: row.get(3)?,
        customer: row.get(4)?,
        model: row.get(5)?,
        area: row.get(6)?,
        line: row.get(7)?,
        remarks: row.get(8)?,
        status: row.get(9)?,
    })
}

// ==========================================
// MasterlistRepository - 治具主数据仓储
// ==========================================
/// 职责: 管理 masterlist 表的 CRUD 操作
pub struct MasterlistRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MasterlistRepository {
    /// 创建新的 MasterlistRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增治具
    ///
    /// # 返回
    /// - Ok(i64): 新记录 item_id
    /// - Err(UniqueConstraintViolation): 序列号已存在
    pub fn insert(&self, item: &MasterlistItem) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO masterlist (
                serial_number, stock_control, item_description, customer,
                model, area, line, remarks, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                item.serial_number,
                item.stock_control,
                item.item_description,
                item.customer,
                item.model,
                item.area,
                item.line,
                item.remarks,
                item.status,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 更新治具,并在同一事务内把主数据字段同步到出入库交易
    ///
    /// # 返回
    /// - Err(NotFound): item_id 不存在
    pub fn update(&self, item_id: i64, item: &MasterlistItem) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let affected = tx.execute(
            r#"
            UPDATE masterlist
            SET serial_number = ?1, stock_control = ?2, item_description = ?3, customer = ?4,
                model = ?5, area = ?6, line = ?7, remarks = ?8, status = ?9
            WHERE item_id = ?10
            "#,
            params![
                item.serial_number,
                item.stock_control,
                item.item_description,
                item.customer,
                item.model,
                item.area,
                item.line,
                item.remarks,
                item.status,
                item_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "MasterlistItem".to_string(),
                id: item_id.to_string(),
            });
        }

        // 交易表按 serial_number 覆盖写入,改序列号时必须一并跟随
        for table in ["transaction_incoming", "transaction_outgoing"] {
            let sql = format!(
                r#"
                UPDATE {}
                SET serial_number = ?1, item_description = ?2, customer = ?3,
                    model = ?4, area = ?5, line = ?6
                WHERE item_id = ?7
                "#,
                table
            );
            tx.execute(
                &sql,
                params![
                    item.serial_number,
                    item.item_description,
                    item.customer,
                    item.model,
                    item.area,
                    item.line,
                    item_id,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// 删除治具（交易记录级联删除）
    pub fn delete(&self, item_id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM masterlist WHERE item_id = ?1", params![item_id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "MasterlistItem".to_string(),
                id: item_id.to_string(),
            });
        }
        Ok(())
    }

    /// 查询全部治具（新录入在前）
    pub fn list_all(&self) -> RepositoryResult<Vec<MasterlistItem>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM masterlist ORDER BY item_id DESC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map([], map_item)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(items)
    }

    /// 按 item_id 查询
    pub fn find_by_id(&self, item_id: i64) -> RepositoryResult<Option<MasterlistItem>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM masterlist WHERE item_id = ?1", SELECT_COLUMNS);
        let item = conn
            .query_row(&sql, params![item_id], map_item)
            .optional()?;
        Ok(item)
    }

    /// 按序列号精确查询（大小写按存储值匹配）
    pub fn find_by_serial(&self, serial: &str) -> RepositoryResult<Option<MasterlistItem>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM masterlist WHERE serial_number = ?1 LIMIT 1",
            SELECT_COLUMNS
        );
        let item = conn
            .query_row(&sql, params![serial], map_item)
            .optional()?;
        Ok(item)
    }

    /// 序列号查询（自动回填用）
    ///
    /// 调用方负责规范化扫码输入
    pub fn lookup_serial(&self, serial: &str) -> RepositoryResult<SerialLookup> {
        Ok(self
            .find_by_serial(serial)?
            .map(|item| SerialLookup::found(item.details()))
            .unwrap_or_else(SerialLookup::not_found))
    }

    /// 按序列号查询 item_id
    pub fn find_id_by_serial(&self, serial: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT item_id FROM masterlist WHERE serial_number = ?1",
                params![serial],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// 统计治具数量
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM masterlist", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
