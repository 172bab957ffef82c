// ==========================================
// 治具使用监控系统 - 治具主数据 API
// ==========================================
// 职责: 主数据录入/修改/删除/列表、扫码序列号带出
// 约束: 所有字段必填（去空白后非空）,序列号唯一
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::masterlist::{MasterlistItem, SerialLookup};
use crate::engine::lookup::normalize_scanned_serial;
use crate::engine::table_view::{paginate, SearchScope, TablePage, TableView};
use crate::repository::masterlist_repo::MasterlistRepository;

// ==========================================
// MasterlistApi - 治具主数据 API
// ==========================================
pub struct MasterlistApi {
    masterlist_repo: Arc<MasterlistRepository>,
    config_manager: Arc<ConfigManager>,
}

impl MasterlistApi {
    pub fn new(masterlist_repo: Arc<MasterlistRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            masterlist_repo,
            config_manager,
        }
    }

    /// 新增治具
    ///
    /// # 返回
    /// - Ok(i64): 新记录 item_id
    /// - Err(InvalidInput): 必填字段为空
    /// - Err(AlreadyExists): 序列号已存在
    pub fn create_item(&self, item: MasterlistItem) -> ApiResult<i64> {
        let item = validate_item(item)?;
        tracing::info!(serial = %item.serial_number, customer = %item.customer, "新增治具");

        let item_id = self.masterlist_repo.insert(&item)?;
        Ok(item_id)
    }

    /// 修改治具（同步入库交易的 model / line）
    pub fn update_item(&self, item_id: i64, item: MasterlistItem) -> ApiResult<()> {
        let item = validate_item(item)?;
        tracing::info!(item_id, serial = %item.serial_number, "修改治具");

        self.masterlist_repo.update(item_id, &item)?;
        Ok(())
    }

    /// 删除治具（交易记录级联删除）
    pub fn delete_item(&self, item_id: i64) -> ApiResult<()> {
        tracing::info!(item_id, "删除治具");
        self.masterlist_repo.delete(item_id)?;
        Ok(())
    }

    /// 按 item_id 查询
    pub fn get_item(&self, item_id: i64) -> ApiResult<MasterlistItem> {
        self.masterlist_repo
            .find_by_id(item_id)?
            .ok_or_else(|| ApiError::NotFound(format!("MasterlistItem(id={})不存在", item_id)))
    }

    /// 构造主数据列表视图（按配置的每页行数,全字段搜索）
    pub fn masterlist_view(&self, page: usize, search: &str) -> ApiResult<TableView> {
        let page_size = self
            .config_manager
            .get_masterlist_rows_per_page()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok(TableView::new(page, page_size).with_search(search, SearchScope::AllFields))
    }

    /// 主数据列表（新录入在前）
    pub fn list_items(&self, view: &TableView) -> ApiResult<TablePage<MasterlistItem>> {
        let items = self.masterlist_repo.list_all()?;
        tracing::debug!(total = items.len(), page = view.page, "查询主数据列表");
        Ok(paginate(&items, view))
    }

    /// 扫码序列号带出
    ///
    /// 输入先去空白并转大写
    pub fn lookup_serial(&self, raw_serial: &str) -> ApiResult<SerialLookup> {
        let serial = normalize_scanned_serial(raw_serial);
        if serial.is_empty() {
            return Ok(SerialLookup::not_found());
        }
        Ok(self.masterlist_repo.lookup_serial(&serial)?)
    }
}

/// 去空白 + 必填校验
fn validate_item(item: MasterlistItem) -> ApiResult<MasterlistItem> {
    let item = item.trimmed();
    let missing: Vec<&str> = item
        .required_fields()
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "必填字段为空: {}",
            missing.join(", ")
        )));
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MasterlistItem {
        MasterlistItem {
            item_id: None,
            serial_number: " SN-001 ".to_string(),
            stock_control: "SC-1".to_string(),
            item_description: "ICT FIXTURE".to_string(),
            customer: "TRC".to_string(),
            model: "M1".to_string(),
            area: "SMT".to_string(),
            line: "L1".to_string(),
            remarks: "GOOD".to_string(),
            status: "ACTIVE".to_string(),
        }
    }

    #[test]
    fn test_validate_item_trims_fields() {
        let validated = validate_item(item()).unwrap();
        assert_eq!(validated.serial_number, "SN-001");
    }

    #[test]
    fn test_validate_item_lists_blank_fields() {
        let mut bad = item();
        bad.line = "   ".to_string();
        bad.status = String::new();

        match validate_item(bad) {
            Err(ApiError::InvalidInput(msg)) => {
                assert!(msg.contains("line"));
                assert!(msg.contains("status"));
            }
            other => panic!("期望 InvalidInput, 实际: {:?}", other),
        }
    }
}
