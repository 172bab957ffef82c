// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用测试环境
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;

use jig_monitoring::api::{DashboardApi, MasterlistApi, TransactionApi};
use jig_monitoring::app::AppState;
use jig_monitoring::config::ConfigManager;
use jig_monitoring::domain::{MasterlistItem, TransactionForm};

use super::test_data_builder::{JigBuilder, TransactionFormBuilder};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 基于 AppState 组装,保证与生产接线一致
pub struct ApiTestEnv {
    pub db_path: String,
    pub dashboard_api: Arc<DashboardApi>,
    pub masterlist_api: Arc<MasterlistApi>,
    pub transaction_api: Arc<TransactionApi>,
    pub config_manager: Arc<ConfigManager>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        jig_monitoring::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            dashboard_api: state.dashboard_api,
            masterlist_api: state.masterlist_api,
            transaction_api: state.transaction_api,
            config_manager: state.config_manager,
            _temp_file: temp_file,
        })
    }

    /// 新增治具并返回 item_id
    pub fn add_jig(&self, item: MasterlistItem) -> i64 {
        self.masterlist_api
            .create_item(item)
            .expect("新增治具失败")
    }

    /// 新增治具并写入一条入库交易
    pub fn add_jig_with_incoming(&self, builder: JigBuilder, usage_count: i64, remarks: &str) -> i64 {
        let item = builder.build();
        let form: TransactionForm = TransactionFormBuilder::from_item(&item)
            .usage(usage_count)
            .remarks(remarks)
            .build();
        let item_id = self.add_jig(item);
        self.transaction_api
            .record_incoming(form)
            .expect("入库录入失败");
        item_id
    }
}
