// ==========================================
// 治具使用监控系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, MasterlistApi, TransactionApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::{EquipmentRepository, MasterlistRepository, TransactionRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "JIG_MONITORING_DB";

/// 应用状态
///
/// 包含所有API实例和共享资源,所有仓储共用同一连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 仪表盘API
    pub dashboard_api: Arc<DashboardApi>,

    /// 治具主数据API
    pub masterlist_api: Arc<MasterlistApi>,

    /// 出入库交易API
    pub transaction_api: Arc<TransactionApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开共享连接并执行建表脚本
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "初始化AppState");

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let masterlist_repo = Arc::new(MasterlistRepository::from_connection(conn.clone()));
        let transaction_repo = Arc::new(TransactionRepository::new(conn.clone()));
        let equipment_repo = Arc::new(EquipmentRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let dashboard_api = Arc::new(DashboardApi::new(equipment_repo, config_manager.clone()));
        let masterlist_api = Arc::new(MasterlistApi::new(
            masterlist_repo.clone(),
            config_manager.clone(),
        ));
        let transaction_api = Arc::new(TransactionApi::new(masterlist_repo, transaction_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            dashboard_api,
            masterlist_api,
            transaction_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先使用环境变量 JIG_MONITORING_DB,否则放在用户数据目录下
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./jig_monitoring.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("jig-monitoring");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("jig_monitoring.db");
        } else {
            tracing::warn!(dir = %dir.display(), "无法创建数据目录，使用当前目录");
        }
    }

    path.to_string_lossy().to_string()
}
