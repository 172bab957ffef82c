// ==========================================
// 治具使用监控系统 - 使用次数分级引擎
// ==========================================
// 规则: ratio = usage / limit
//   ratio >= 1.0 → EXCEEDED
//   ratio >= 0.8 → WARNING
//   其他         → OK
// 边界含等号; 使用整数比较保证边界精确
// ==========================================

use crate::domain::equipment::{ClassifiedRecord, EquipmentRecord, DEFAULT_USAGE_LIMIT};
use crate::domain::types::Classification;
use serde::{Deserialize, Serialize};

/// 预警比例 = WARNING_NUMERATOR / WARNING_DENOMINATOR (80%)
const WARNING_NUMERATOR: i128 = 4;
const WARNING_DENOMINATOR: i128 = 5;

// ==========================================
// UsageAssessment - 完整分级结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageAssessment {
    pub raw_usage: i64,       // 原始使用次数 (可能为负)
    pub effective_usage: i64, // 归一化后使用次数 (>= 0)
    pub effective_limit: i64, // 实际生效上限 (> 0)
    pub ratio: f64,           // effective_usage / effective_limit
    pub classification: Classification,
}

// ==========================================
// UsageClassifier - 分级引擎
// ==========================================
// 红线: 无状态,所有方法都是纯函数,永不失败
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageClassifier;

impl UsageClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 实际生效上限: limit <= 0 时替换为 1000
    pub fn effective_limit(limit: i64) -> i64 {
        if limit > 0 {
            limit
        } else {
            DEFAULT_USAGE_LIMIT
        }
    }

    /// 按使用次数与上限分级
    pub fn classify(&self, usage_count: i64, limit: i64) -> Classification {
        let usage = usage_count.max(0) as i128;
        let limit = Self::effective_limit(limit) as i128;

        if usage >= limit {
            Classification::Exceeded
        } else if usage * WARNING_DENOMINATOR >= limit * WARNING_NUMERATOR {
            Classification::Warning
        } else {
            Classification::Ok
        }
    }

    /// 分级并返回原始值、归一化值与使用率
    pub fn assess(&self, usage_count: i64, limit: i64) -> UsageAssessment {
        let effective_usage = usage_count.max(0);
        let effective_limit = Self::effective_limit(limit);

        UsageAssessment {
            raw_usage: usage_count,
            effective_usage,
            effective_limit,
            ratio: effective_usage as f64 / effective_limit as f64,
            classification: self.classify(usage_count, limit),
        }
    }

    /// 为单条记录附加分级
    pub fn classify_record(&self, record: &EquipmentRecord) -> ClassifiedRecord {
        let assessment = self.assess(record.usage_count, record.limit);
        ClassifiedRecord {
            record: record.clone(),
            classification: assessment.classification,
            usage_ratio: assessment.ratio,
        }
    }

    /// 批量分级 (保持输入顺序)
    pub fn classify_all(&self, records: &[EquipmentRecord]) -> Vec<ClassifiedRecord> {
        records.iter().map(|r| self.classify_record(r)).collect()
    }
}

/// 便捷函数: 等价于 `UsageClassifier::new().classify(..)`
pub fn classify(usage_count: i64, limit: i64) -> Classification {
    UsageClassifier.classify(usage_count, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(999, 1000), Classification::Warning);
        assert_eq!(classify(800, 1000), Classification::Warning);
        assert_eq!(classify(799, 1000), Classification::Ok);
        assert_eq!(classify(1000, 1000), Classification::Exceeded);
        assert_eq!(classify(1200, 1000), Classification::Exceeded);
        assert_eq!(classify(0, 1000), Classification::Ok);
    }

    #[test]
    fn test_classify_non_divisible_limit() {
        // 0.8 * 7 = 5.6
        assert_eq!(classify(5, 7), Classification::Ok);
        assert_eq!(classify(6, 7), Classification::Warning);
        assert_eq!(classify(7, 7), Classification::Exceeded);

        // 0.8 * 5 = 4 (恰好在边界上)
        assert_eq!(classify(3, 5), Classification::Ok);
        assert_eq!(classify(4, 5), Classification::Warning);

        assert_eq!(classify(0, 1), Classification::Ok);
        assert_eq!(classify(1, 1), Classification::Exceeded);
    }

    #[test]
    fn test_default_limit_substitution() {
        for usage in [0, 500, 799, 800, 999, 1000, 5000] {
            assert_eq!(classify(usage, 0), classify(usage, 1000));
            assert_eq!(classify(usage, -20), classify(usage, 1000));
        }
    }

    #[test]
    fn test_monotonic_in_usage() {
        for limit in [1, 3, 7, 10, 999, 1000, 1250] {
            let mut previous = classify(0, limit);
            for usage in 0..=(limit * 2) {
                let current = classify(usage, limit);
                assert!(
                    current >= previous,
                    "usage={} limit={} 分级回退: {:?} -> {:?}",
                    usage,
                    limit,
                    previous,
                    current
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_negative_usage_normalized_but_preserved() {
        let classifier = UsageClassifier::new();
        let assessment = classifier.assess(-50, 1000);
        assert_eq!(assessment.raw_usage, -50);
        assert_eq!(assessment.effective_usage, 0);
        assert_eq!(assessment.ratio, 0.0);
        assert_eq!(assessment.classification, Classification::Ok);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert_eq!(classify(i64::MAX, i64::MAX), Classification::Exceeded);
        assert_eq!(classify(i64::MAX - 1, i64::MAX), Classification::Warning);
        assert_eq!(classify(i64::MIN, 1000), Classification::Ok);
    }

    #[test]
    fn test_classify_record_keeps_original_fields() {
        let classifier = UsageClassifier::new();
        let record = EquipmentRecord::without_transaction("SN1", "ICT", "TRC", "M1", "SMT")
            .with_usage(900, "GOOD")
            .with_limit(0);
        let classified = classifier.classify_record(&record);

        assert_eq!(classified.record, record);
        assert_eq!(classified.record.limit, 0);
        assert_eq!(classified.classification, Classification::Warning);
        assert!((classified.usage_ratio - 0.9).abs() < 1e-9);

        let json = serde_json::to_value(&classified).unwrap();
        assert_eq!(json["serial"], "SN1");
        assert_eq!(json["classification"], "WARNING");
    }
}
