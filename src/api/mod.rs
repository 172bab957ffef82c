// ==========================================
// 治具使用监控系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行与调用方使用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod masterlist_api;
pub mod transaction_api;

// 重导出核心类型
pub use dashboard_api::{CustomerAreaSummary, DashboardApi};
pub use error::{ApiError, ApiResult};
pub use masterlist_api::MasterlistApi;
pub use transaction_api::TransactionApi;
