// ==========================================
// 治具使用监控系统 - 引擎层
// ==========================================
// 职责: 分级、计数、汇总、列表视图等纯规则
// 红线: Engine 不拼 SQL, 无共享可变状态
// ==========================================

pub mod aggregator;
pub mod classifier;
pub mod lookup;
pub mod table_view;
pub mod tally;

// 重导出核心引擎
pub use aggregator::{
    area_customer_key, area_description_key, area_key, customer_filter, SummaryAggregator,
    SummaryOptions,
};
pub use classifier::{classify, UsageAssessment, UsageClassifier};
pub use lookup::{normalize_scanned_serial, SerialDirectory};
pub use table_view::{paginate, SearchScope, Searchable, TablePage, TableView};
pub use tally::{tally_by_remarks, tally_by_threshold, tally_with_rule};
