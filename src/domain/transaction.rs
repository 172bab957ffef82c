// ==========================================
// 治具使用监控系统 - 出入库交易
// ==========================================
// 对齐: transaction_incoming / transaction_outgoing 表
// 同一序列号重复提交时覆盖 (后写生效)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 交易方向
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionDirection {
    Incoming, // 入库 (扫码收回)
    Outgoing, // 出库 (扫码发出)
}

impl TransactionDirection {
    /// 对应的数据表
    pub fn table_name(&self) -> &'static str {
        match self {
            TransactionDirection::Incoming => "transaction_incoming",
            TransactionDirection::Outgoing => "transaction_outgoing",
        }
    }
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionDirection::Incoming => write!(f, "INCOMING"),
            TransactionDirection::Outgoing => write!(f, "OUTGOING"),
        }
    }
}

// ==========================================
// JigTransaction - 交易记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JigTransaction {
    pub direction: TransactionDirection,
    pub item_id: Option<i64>, // 关联 masterlist.item_id,写入时由仓储层回填
    pub serial_number: String,
    pub item_description: String,
    pub customer: String,
    pub model: String,
    pub area: String,
    pub line: String,
    pub usage_count: i64,
    pub status: String,
    pub remarks: String,
    pub transaction_date: Option<NaiveDateTime>, // 写入时取当前时间
}

/// 交易录入请求 (来自扫码表单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub serial: String,
    pub item_description: String,
    pub customer: String,
    pub model: String,
    pub area: String,
    pub line: String,
    pub usage_count: i64,
    pub status: String,
    pub remarks: String,
}

impl TransactionForm {
    /// 必填文本字段 (字段名, 取值)
    pub fn required_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("serial", &self.serial),
            ("itemDescription", &self.item_description),
            ("customer", &self.customer),
            ("model", &self.model),
            ("area", &self.area),
            ("line", &self.line),
            ("status", &self.status),
            ("remarks", &self.remarks),
        ]
    }

    /// 转换为交易记录
    pub fn into_transaction(
        self,
        direction: TransactionDirection,
        transaction_date: NaiveDateTime,
    ) -> JigTransaction {
        JigTransaction {
            direction,
            item_id: None,
            serial_number: self.serial.trim().to_string(),
            item_description: self.item_description.trim().to_string(),
            customer: self.customer.trim().to_string(),
            model: self.model.trim().to_string(),
            area: self.area.trim().to_string(),
            line: self.line.trim().to_string(),
            usage_count: self.usage_count,
            status: self.status.trim().to_string(),
            remarks: self.remarks.trim().to_string(),
            transaction_date: Some(transaction_date),
        }
    }
}
