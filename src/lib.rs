// ==========================================
// 治具使用监控系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 治具使用次数跟踪、分级与区域汇总
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 分级/汇总/分页规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Classification, HealthRule, OrderBy, RemarksTag};

// 领域实体
pub use domain::{
    ClassifiedRecord, EquipmentRecord, HealthTally, JigTransaction, MasterlistItem, SerialLookup,
    SummaryTable,
};

// 引擎
pub use engine::{
    classify, paginate, tally_by_remarks, tally_by_threshold, SummaryAggregator, SummaryOptions,
    TablePage, TableView, UsageClassifier,
};

// API
pub use api::{DashboardApi, MasterlistApi, TransactionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "治具使用监控系统";

// 数据库版本
pub const DB_VERSION: &str = "v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexported_classifier() {
        assert_eq!(classify(800, 1000), Classification::Warning);
    }
}
