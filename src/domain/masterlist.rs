// ==========================================
// 治具使用监控系统 - 治具主数据 (Masterlist)
// ==========================================
// 对齐: schema.sql masterlist 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MasterlistItem - 治具主数据
// ==========================================
// serial_number 全表唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterlistItem {
    pub item_id: Option<i64>, // 新建时为 None
    pub serial_number: String,
    pub stock_control: String,
    pub item_description: String,
    pub customer: String,
    pub model: String,
    pub area: String,
    pub line: String,
    pub remarks: String,
    pub status: String,
}

impl MasterlistItem {
    /// 必填字段 (字段名, 取值)
    pub fn required_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("item_description", &self.item_description),
            ("customer", &self.customer),
            ("serial_number", &self.serial_number),
            ("stock_control", &self.stock_control),
            ("model", &self.model),
            ("area", &self.area),
            ("line", &self.line),
            ("remarks", &self.remarks),
            ("status", &self.status),
        ]
    }

    /// 去除所有文本字段首尾空白
    pub fn trimmed(self) -> Self {
        Self {
            item_id: self.item_id,
            serial_number: self.serial_number.trim().to_string(),
            stock_control: self.stock_control.trim().to_string(),
            item_description: self.item_description.trim().to_string(),
            customer: self.customer.trim().to_string(),
            model: self.model.trim().to_string(),
            area: self.area.trim().to_string(),
            line: self.line.trim().to_string(),
            remarks: self.remarks.trim().to_string(),
            status: self.status.trim().to_string(),
        }
    }

    /// 自动带出字段
    pub fn details(&self) -> SerialDetails {
        SerialDetails {
            description: self.item_description.clone(),
            customer: self.customer.clone(),
            area: self.area.clone(),
            model: self.model.clone(),
        }
    }
}

// ==========================================
// SerialDetails - 扫码自动带出字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialDetails {
    pub description: String,
    pub customer: String,
    pub area: String,
    pub model: String,
}

// ==========================================
// SerialLookup - 序列号查询结果
// ==========================================
// found=false 时不带任何字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialLookup {
    pub found: bool,
    #[serde(flatten)]
    pub details: Option<SerialDetails>,
    /// 出库带出时附带最近一次入库使用次数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<i64>,
}

impl SerialLookup {
    pub fn not_found() -> Self {
        Self {
            found: false,
            details: None,
            usage_count: None,
        }
    }

    pub fn found(details: SerialDetails) -> Self {
        Self {
            found: true,
            details: Some(details),
            usage_count: None,
        }
    }

    pub fn with_usage_count(mut self, usage_count: i64) -> Self {
        if self.found {
            self.usage_count = Some(usage_count);
        }
        self
    }
}
