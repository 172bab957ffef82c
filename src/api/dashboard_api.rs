// ==========================================
// 治具使用监控系统 - 仪表盘 API
// ==========================================
// 职责: 治具使用列表(分级 + 分页 + 搜索)、区域汇总、CSV 导出
// 架构: API 层 → Engine 层 (分级/汇总/分页) → Repository 层
// ==========================================

use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::ConfigManager;
use crate::domain::equipment::{ClassifiedRecord, EquipmentRecord};
use crate::domain::masterlist::SerialLookup;
use crate::domain::summary::{AreaDescriptionRow, ThresholdAreaRow};
use crate::engine::aggregator::{customer_filter, SummaryAggregator, SummaryOptions};
use crate::engine::classifier::UsageClassifier;
use crate::engine::lookup::{normalize_scanned_serial, SerialDirectory};
use crate::engine::table_view::{paginate, SearchScope, TablePage, TableView};
use crate::repository::equipment_repo::EquipmentRepository;

/// CSV 导出表头
const EXPORT_HEADER: [&str; 9] = [
    "SERIAL",
    "ITEM DESCRIPTION",
    "CUSTOMER",
    "MODEL",
    "AREA",
    "USAGE COUNT",
    "LIMIT",
    "REMARKS",
    "CLASSIFICATION",
];

// ==========================================
// 响应 DTO
// ==========================================

/// 单个客户的区域汇总（阈值口径,末行为 TOTAL）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAreaSummary {
    pub customer: String,
    pub rows: Vec<ThresholdAreaRow>,
}

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================
pub struct DashboardApi {
    equipment_repo: Arc<EquipmentRepository>,
    config_manager: Arc<ConfigManager>,
    classifier: UsageClassifier,
}

impl DashboardApi {
    pub fn new(equipment_repo: Arc<EquipmentRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            equipment_repo,
            config_manager,
            classifier: UsageClassifier::new(),
        }
    }

    fn default_usage_limit(&self) -> ApiResult<i64> {
        self.config_manager
            .get_default_usage_limit()
            .map_err(|e| ApiError::InternalError(e.to_string()))
    }

    fn load_equipment(&self) -> ApiResult<Vec<EquipmentRecord>> {
        let limit = self.default_usage_limit()?;
        Ok(self.equipment_repo.list_equipment(limit)?)
    }

    /// 构造仪表盘视图（按配置的每页行数,仅按序列号搜索）
    pub fn dashboard_view(&self, page: usize, search: &str) -> ApiResult<TableView> {
        let page_size = self
            .config_manager
            .get_dashboard_rows_per_page()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        Ok(TableView::new(page, page_size).with_search(search, SearchScope::SerialOnly))
    }

    /// 查询治具使用列表
    ///
    /// # 返回
    /// 当前页记录,每行附带 classification
    pub fn list_equipment(&self, view: &TableView) -> ApiResult<TablePage<ClassifiedRecord>> {
        tracing::info!(page = view.page, search = %view.search, "查询治具使用列表");

        let records = self.load_equipment()?;
        let classified = self.classifier.classify_all(&records);
        Ok(paginate(&classified, view))
    }

    /// 在当前使用记录快照中查找序列号
    pub fn lookup_serial(&self, raw_serial: &str) -> ApiResult<SerialLookup> {
        let serial = normalize_scanned_serial(raw_serial);
        let records = self.load_equipment()?;
        Ok(records.as_slice().lookup(&serial))
    }

    /// 区域 + 品名汇总（备注口径,按首次出现顺序）
    ///
    /// # 参数
    /// - include_total: 是否追加 TOTAL 行
    pub fn area_description_summary(&self, include_total: bool) -> ApiResult<Vec<AreaDescriptionRow>> {
        tracing::info!(include_total, "查询区域品名汇总");

        let records = self.load_equipment()?;
        let aggregator = SummaryAggregator::new(SummaryOptions::remarks_report().with_total(include_total));
        let table = aggregator.by_area_description(&records, None);

        let mut rows: Vec<AreaDescriptionRow> = table.rows.into_iter().map(Into::into).collect();
        if let Some(total) = table.total {
            rows.push(AreaDescriptionRow::total(total));
        }
        Ok(rows)
    }

    /// 单个客户的区域汇总（阈值口径,区域升序,末行 TOTAL）
    ///
    /// 仅统计有入库交易的治具
    pub fn customer_area_summary(&self, customer: &str) -> ApiResult<CustomerAreaSummary> {
        if customer.trim().is_empty() {
            return Err(ApiError::InvalidInput("客户不能为空".to_string()));
        }
        tracing::info!(customer = customer, "查询客户区域汇总");

        let limit = self.default_usage_limit()?;
        let records = self.equipment_repo.list_transacted(limit)?;
        Ok(summarize_customer(&records, customer))
    }

    /// 仪表盘汇总: 每个配置客户一张区域汇总表
    pub fn dashboard_summary(&self) -> ApiResult<Vec<CustomerAreaSummary>> {
        let customers = self
            .config_manager
            .get_summary_customers()
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        tracing::info!(customers = ?customers, "查询仪表盘汇总");

        let limit = self.default_usage_limit()?;
        let records = self.equipment_repo.list_transacted(limit)?;
        Ok(customers
            .iter()
            .map(|customer| summarize_customer(&records, customer))
            .collect())
    }

    /// 导出治具使用列表为 CSV
    ///
    /// 单元格内的逗号替换为分号
    ///
    /// # 返回
    /// 导出的数据行数（不含表头）
    pub fn export_equipment_csv<W: Write>(&self, writer: W) -> ApiResult<usize> {
        let records = self.load_equipment()?;
        let classified = self.classifier.classify_all(&records);

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(EXPORT_HEADER)?;
        for row in &classified {
            let r = &row.record;
            csv_writer.write_record([
                sanitize_cell(&r.serial),
                sanitize_cell(&r.item_description),
                sanitize_cell(&r.customer),
                sanitize_cell(&r.model),
                sanitize_cell(&r.area),
                r.usage_count.to_string(),
                r.limit.to_string(),
                sanitize_cell(&r.remarks),
                row.classification.to_string(),
            ])?;
        }
        csv_writer
            .flush()
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        tracing::info!(rows = classified.len(), "CSV 导出完成");
        Ok(classified.len())
    }
}

fn summarize_customer(records: &[EquipmentRecord], customer: &str) -> CustomerAreaSummary {
    let aggregator = SummaryAggregator::new(SummaryOptions::threshold_report());
    let filter = customer_filter(customer);
    let table = aggregator.by_area(records, Some(&filter));

    let mut rows: Vec<ThresholdAreaRow> = table.rows.into_iter().map(Into::into).collect();
    if let Some(total) = table.total {
        rows.push(ThresholdAreaRow::total(total));
    }

    CustomerAreaSummary {
        customer: customer.trim().to_string(),
        rows,
    }
}

fn sanitize_cell(value: &str) -> String {
    value.replace(',', ";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_cell_replaces_commas() {
        assert_eq!(sanitize_cell("PIN, GAUGE,X"), "PIN; GAUGE;X");
        assert_eq!(sanitize_cell("PLAIN"), "PLAIN");
    }

    #[test]
    fn test_summarize_customer_appends_total() {
        let records = vec![
            EquipmentRecord::without_transaction("S1", "PIN", "TRC", "M", "B").with_usage(1000, "GOOD"),
            EquipmentRecord::without_transaction("S2", "PIN", "trc ", "M", "A").with_usage(10, "GOOD"),
            EquipmentRecord::without_transaction("S3", "PIN", "EPPI", "M", "A").with_usage(10, "GOOD"),
        ];

        let summary = summarize_customer(&records, "TRC");
        let areas: Vec<&str> = summary.rows.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["A", "B", "TOTAL"]);

        let total = &summary.rows[2];
        assert_eq!(total.equipment_qty, 2);
        assert_eq!(total.good, 1);
        assert_eq!(total.not_good, 1);
    }
}
