// ==========================================
// 治具使用监控系统 - 汇总行领域模型
// ==========================================
// 汇总行是记录集合的纯投影,每次请求重新生成
// 分组键使用强类型结构,不做字符串拼接
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// 区域为空时的占位标签
pub const AREA_SENTINEL: &str = "N/A";

/// 品名/客户为空时的占位标签
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// 合计行标签
pub const TOTAL_LABEL: &str = "TOTAL";

fn or_sentinel(value: String, sentinel: &str) -> String {
    if value.trim().is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}

// ==========================================
// Trait: GroupKey - 分组键
// ==========================================
pub trait GroupKey: Clone + Eq + Hash + Ord {
    /// 将空字段替换为占位标签 (空键不丢弃)
    fn normalized(self) -> Self;

    /// 展示用标签
    fn label(&self) -> String;
}

impl GroupKey for String {
    fn normalized(self) -> Self {
        or_sentinel(self, AREA_SENTINEL)
    }

    fn label(&self) -> String {
        self.clone()
    }
}

/// 按区域分组
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaKey {
    pub area: String,
}

impl GroupKey for AreaKey {
    fn normalized(self) -> Self {
        Self {
            area: or_sentinel(self.area, AREA_SENTINEL),
        }
    }

    fn label(&self) -> String {
        self.area.clone()
    }
}

/// 按区域 + 客户分组
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaCustomerKey {
    pub area: String,
    pub customer: String,
}

impl GroupKey for AreaCustomerKey {
    fn normalized(self) -> Self {
        Self {
            area: or_sentinel(self.area, AREA_SENTINEL),
            customer: or_sentinel(self.customer, UNKNOWN_SENTINEL),
        }
    }

    fn label(&self) -> String {
        format!("{} / {}", self.area, self.customer)
    }
}

/// 按区域 + 品名分组
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaDescriptionKey {
    pub area: String,
    pub description: String,
}

impl GroupKey for AreaDescriptionKey {
    fn normalized(self) -> Self {
        Self {
            area: or_sentinel(self.area, AREA_SENTINEL),
            description: or_sentinel(self.description, UNKNOWN_SENTINEL),
        }
    }

    fn label(&self) -> String {
        format!("{} / {}", self.area, self.description)
    }
}

// ==========================================
// HealthTally - 好/不良计数
// ==========================================
// 不变式: good + not_good <= total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HealthTally {
    pub total: usize,
    pub good: usize,
    pub not_good: usize,
}

impl HealthTally {
    /// 未归类数量 (备注既非 GOOD 也非 NG)
    pub fn uncategorized(&self) -> usize {
        self.total - self.good - self.not_good
    }

    /// 逐列累加
    pub fn absorb(&mut self, other: &HealthTally) {
        self.total += other.total;
        self.good += other.good;
        self.not_good += other.not_good;
    }
}

impl fmt::Display for HealthTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={}, good={}, not_good={}",
            self.total, self.good, self.not_good
        )
    }
}

// ==========================================
// SummaryRow - 分组汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow<K> {
    pub key: K,
    #[serde(flatten)]
    pub tally: HealthTally,
}

impl<K: GroupKey> SummaryRow<K> {
    pub fn label(&self) -> String {
        self.key.label()
    }
}

// ==========================================
// SummaryTable - 汇总结果
// ==========================================
// total: 可选合计行 (TOTAL),为各组逐列求和
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable<K> {
    pub rows: Vec<SummaryRow<K>>,
    pub total: Option<HealthTally>,
}

impl<K> SummaryTable<K> {
    /// 各组 total 之和
    pub fn grand_total(&self) -> usize {
        self.rows.iter().map(|r| r.tally.total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// 输出形态 1: 阈值口径区域汇总
// ==========================================
// { area, equipment_qty, good, not_good }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdAreaRow {
    pub area: String,
    pub equipment_qty: usize,
    pub good: usize,
    pub not_good: usize,
}

impl From<SummaryRow<AreaKey>> for ThresholdAreaRow {
    fn from(row: SummaryRow<AreaKey>) -> Self {
        Self {
            area: row.key.area,
            equipment_qty: row.tally.total,
            good: row.tally.good,
            not_good: row.tally.not_good,
        }
    }
}

impl ThresholdAreaRow {
    /// 合计行
    pub fn total(tally: HealthTally) -> Self {
        Self {
            area: TOTAL_LABEL.to_string(),
            equipment_qty: tally.total,
            good: tally.good,
            not_good: tally.not_good,
        }
    }
}

// ==========================================
// 输出形态 2: 备注口径区域+品名汇总
// ==========================================
// { area, description, totalQty, good, ng }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDescriptionRow {
    pub area: String,
    pub description: String,
    #[serde(rename = "totalQty")]
    pub total_qty: usize,
    pub good: usize,
    pub ng: usize,
}

impl From<SummaryRow<AreaDescriptionKey>> for AreaDescriptionRow {
    fn from(row: SummaryRow<AreaDescriptionKey>) -> Self {
        Self {
            area: row.key.area,
            description: row.key.description,
            total_qty: row.tally.total,
            good: row.tally.good,
            ng: row.tally.not_good,
        }
    }
}

impl AreaDescriptionRow {
    /// 合计行 (description 留空)
    pub fn total(tally: HealthTally) -> Self {
        Self {
            area: TOTAL_LABEL.to_string(),
            description: String::new(),
            total_qty: tally.total,
            good: tally.good,
            ng: tally.not_good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_replace_blank_components() {
        let key = AreaDescriptionKey {
            area: "  ".to_string(),
            description: String::new(),
        }
        .normalized();
        assert_eq!(key.area, AREA_SENTINEL);
        assert_eq!(key.description, UNKNOWN_SENTINEL);

        assert_eq!(String::new().normalized(), AREA_SENTINEL);
    }

    #[test]
    fn test_tuple_keys_do_not_collide_on_separator() {
        // "A-B" + "C" 与 "A" + "B-C" 拼接后相同,强类型键必须区分
        let k1 = AreaDescriptionKey {
            area: "A-B".to_string(),
            description: "C".to_string(),
        };
        let k2 = AreaDescriptionKey {
            area: "A".to_string(),
            description: "B-C".to_string(),
        };
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_output_shapes_field_names() {
        let row = AreaDescriptionRow::from(SummaryRow {
            key: AreaDescriptionKey {
                area: "SMT".to_string(),
                description: "ICT".to_string(),
            },
            tally: HealthTally {
                total: 3,
                good: 2,
                not_good: 1,
            },
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["totalQty"], 3);
        assert_eq!(json["ng"], 1);

        let row = ThresholdAreaRow::total(HealthTally {
            total: 5,
            good: 4,
            not_good: 1,
        });
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["area"], "TOTAL");
        assert_eq!(json["equipment_qty"], 5);
        assert_eq!(json["not_good"], 1);
    }
}
