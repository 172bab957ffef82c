// ==========================================
// 治具使用监控系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、派生值类型
// 红线: 不含数据访问逻辑,不含规则判定
// ==========================================

pub mod equipment;
pub mod masterlist;
pub mod summary;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use equipment::{ClassifiedRecord, EquipmentRecord, DEFAULT_USAGE_LIMIT, REMARKS_NO_TRANSACTION};
pub use masterlist::{MasterlistItem, SerialDetails, SerialLookup};
pub use summary::{
    AreaCustomerKey, AreaDescriptionKey, AreaDescriptionRow, AreaKey, GroupKey, HealthTally,
    SummaryRow, SummaryTable, ThresholdAreaRow,
};
pub use transaction::{JigTransaction, TransactionDirection, TransactionForm};
pub use types::{Classification, HealthRule, OrderBy, RemarksTag};
