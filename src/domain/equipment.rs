// ==========================================
// 治具使用监控系统 - 治具使用记录
// ==========================================
// 来源: masterlist LEFT JOIN transaction_incoming
// 红线: 本模块只读记录,不拥有其生命周期
// ==========================================

use crate::domain::types::Classification;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 未配置或配置非法时的使用上限
pub const DEFAULT_USAGE_LIMIT: i64 = 1000;

/// 无交易记录时的默认备注
pub const REMARKS_NO_TRANSACTION: &str = "NO TRANSACTION";

// ==========================================
// EquipmentRecord - 治具使用记录
// ==========================================
// 数值字段宽松解析: 缺失/非法的 usage_count 记为 0, limit 记为 1000
// 单条坏数据不影响整批处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub serial: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: String,
    #[serde(default, deserialize_with = "lenient_usage")]
    pub usage_count: i64,
    #[serde(default = "default_limit", deserialize_with = "lenient_limit")]
    pub limit: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: String,
}

impl EquipmentRecord {
    /// 创建一条尚无交易的记录 (usage_count=0, remarks="NO TRANSACTION")
    pub fn without_transaction(
        serial: impl Into<String>,
        item_description: impl Into<String>,
        customer: impl Into<String>,
        model: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            serial: serial.into(),
            item_description: item_description.into(),
            customer: customer.into(),
            model: model.into(),
            area: area.into(),
            usage_count: 0,
            limit: DEFAULT_USAGE_LIMIT,
            remarks: REMARKS_NO_TRANSACTION.to_string(),
        }
    }

    /// 设置使用次数与备注
    pub fn with_usage(mut self, usage_count: i64, remarks: impl Into<String>) -> Self {
        self.usage_count = usage_count;
        self.remarks = remarks.into();
        self
    }

    /// 设置使用上限
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// 是否为无交易记录
    pub fn has_no_transaction(&self) -> bool {
        self.remarks.trim().eq_ignore_ascii_case(REMARKS_NO_TRANSACTION)
    }
}

// ==========================================
// ClassifiedRecord - 带分级的记录
// ==========================================
// 输出边界: 原记录字段 + classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: EquipmentRecord,
    pub classification: Classification,
    /// 归一化使用率 (负数使用次数按 0 计算)
    pub usage_ratio: f64,
}

// ==========================================
// 宽松解析辅助函数
// ==========================================

fn default_limit() -> i64 {
    DEFAULT_USAGE_LIMIT
}

/// 将 JSON 值转换为整数: 支持数字、数字字符串
pub(crate) fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

fn lenient_usage<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = value.as_ref().and_then(coerce_integer);
    if parsed.is_none() && !matches!(value, None | Some(Value::Null)) {
        tracing::warn!(raw_value = ?value, "usage_count 无法解析，按 0 处理");
    }
    Ok(parsed.unwrap_or(0))
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value.as_ref().and_then(coerce_integer) {
        Some(limit) if limit > 0 => Ok(limit),
        _ => {
            if !matches!(value, None | Some(Value::Null)) {
                tracing::warn!(raw_value = ?value, "limit 非法，使用默认上限 {}", DEFAULT_USAGE_LIMIT);
            }
            Ok(DEFAULT_USAGE_LIMIT)
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
