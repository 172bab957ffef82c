// ==========================================
// 治具使用监控系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (scope_id='global')
// 约定: 配置缺失或格式错误时回退默认值并记录 warn
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::equipment::DEFAULT_USAGE_LIMIT;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// 仪表盘每页行数默认值
pub const DEFAULT_DASHBOARD_ROWS_PER_PAGE: usize = 13;

/// 主数据列表每页行数默认值
pub const DEFAULT_MASTERLIST_ROWS_PER_PAGE: usize = 12;

/// 仪表盘汇总默认客户
pub const DEFAULT_SUMMARY_CUSTOMERS: &str = "TRC,EPPI";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式,按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取并解析配置,缺失或格式错误时使用默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let raw = match self.get_global_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    // ===== 使用上限 =====

    /// 获取默认使用上限
    ///
    /// 非正数视为无效配置
    pub fn get_default_usage_limit(&self) -> Result<i64, Box<dyn Error>> {
        let limit = self.get_parsed_or_default(config_keys::DEFAULT_USAGE_LIMIT, DEFAULT_USAGE_LIMIT)?;
        if limit <= 0 {
            tracing::warn!(
                config_key = config_keys::DEFAULT_USAGE_LIMIT,
                raw_value = limit,
                "使用上限必须为正数，使用默认值"
            );
            return Ok(DEFAULT_USAGE_LIMIT);
        }
        Ok(limit)
    }

    // ===== 分页 =====

    pub fn get_dashboard_rows_per_page(&self) -> Result<usize, Box<dyn Error>> {
        let rows = self.get_parsed_or_default(
            config_keys::DASHBOARD_ROWS_PER_PAGE,
            DEFAULT_DASHBOARD_ROWS_PER_PAGE,
        )?;
        Ok(rows.max(1))
    }

    pub fn get_masterlist_rows_per_page(&self) -> Result<usize, Box<dyn Error>> {
        let rows = self.get_parsed_or_default(
            config_keys::MASTERLIST_ROWS_PER_PAGE,
            DEFAULT_MASTERLIST_ROWS_PER_PAGE,
        )?;
        Ok(rows.max(1))
    }

    // ===== 仪表盘汇总 =====

    /// 获取仪表盘汇总客户列表
    ///
    /// 配置格式为逗号分隔: "TRC,EPPI"; 空项忽略,全空时回退默认值
    pub fn get_summary_customers(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let raw = self
            .get_global_config_value(config_keys::SUMMARY_CUSTOMERS)?
            .unwrap_or_else(|| DEFAULT_SUMMARY_CUSTOMERS.to_string());

        let customers = split_customers(&raw);
        if customers.is_empty() {
            tracing::warn!(
                config_key = config_keys::SUMMARY_CUSTOMERS,
                raw_value = %raw,
                "汇总客户配置为空，使用默认值"
            );
            return Ok(split_customers(DEFAULT_SUMMARY_CUSTOMERS));
        }
        Ok(customers)
    }
}

fn split_customers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 分级
    pub const DEFAULT_USAGE_LIMIT: &str = "default_usage_limit";

    // 分页
    pub const DASHBOARD_ROWS_PER_PAGE: &str = "dashboard_rows_per_page";
    pub const MASTERLIST_ROWS_PER_PAGE: &str = "masterlist_rows_per_page";

    // 仪表盘汇总
    pub const SUMMARY_CUSTOMERS: &str = "summary_customers";
}
