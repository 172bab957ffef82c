// ==========================================
// 治具使用监控系统 - 领域类型定义
// ==========================================
// 分级结果只在读取时派生,不落库
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 使用分级 (Usage Classification)
// ==========================================
// 顺序: Ok < Warning < Exceeded
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Ok,       // 使用率 < 80%
    Warning,  // 80% <= 使用率 < 100%
    Exceeded, // 使用率 >= 100%
}

impl Classification {
    /// 是否已达到上限
    pub fn is_exceeded(&self) -> bool {
        matches!(self, Classification::Exceeded)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Ok => write!(f, "OK"),
            Classification::Warning => write!(f, "WARNING"),
            Classification::Exceeded => write!(f, "EXCEEDED"),
        }
    }
}

// ==========================================
// 备注标签 (Remarks Tag)
// ==========================================
// 操作员手工填写的状态,与阈值分级相互独立
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemarksTag {
    Good,          // "GOOD"
    NotGood,       // "NG"
    Uncategorized, // 其他任何文本 (含 "NO TRANSACTION"、空串)
}

impl RemarksTag {
    /// 解析备注文本
    ///
    /// 去除首尾空白并转大写后精确匹配 "GOOD" / "NG"
    pub fn parse(remarks: &str) -> Self {
        match remarks.trim().to_uppercase().as_str() {
            "GOOD" => RemarksTag::Good,
            "NG" => RemarksTag::NotGood,
            _ => RemarksTag::Uncategorized,
        }
    }
}

impl fmt::Display for RemarksTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemarksTag::Good => write!(f, "GOOD"),
            RemarksTag::NotGood => write!(f, "NG"),
            RemarksTag::Uncategorized => write!(f, "UNCATEGORIZED"),
        }
    }
}

// ==========================================
// 汇总排序方式 (Order By)
// ==========================================
// Key: 按分组键升序 (客户区域汇总)
// Insertion: 按首次出现顺序 (区域+品名汇总)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Key,
    Insertion,
}

// ==========================================
// 好/不良判定口径 (Health Rule)
// ==========================================
// 两套口径并存,由调用方显式选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthRule {
    /// 按备注: GOOD 计好, NG 计不良
    #[default]
    Remarks,
    /// 按阈值: 未达上限计好, 达到上限计不良
    Threshold,
}

impl fmt::Display for HealthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthRule::Remarks => write!(f, "REMARKS"),
            HealthRule::Threshold => write!(f, "THRESHOLD"),
        }
    }
}
