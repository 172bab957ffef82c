// ==========================================
// 治具使用监控系统 - 分组汇总引擎
// ==========================================
// 输入: 治具使用记录快照
// 输出: 分组汇总行 (+ 可选合计行)
// 流程: 过滤(保持相对顺序) → 分组(强类型键) → 计数 → 排序
// ==========================================

use crate::domain::equipment::EquipmentRecord;
use crate::domain::summary::{
    AreaCustomerKey, AreaDescriptionKey, AreaKey, GroupKey, HealthTally, SummaryRow, SummaryTable,
};
use crate::domain::types::{HealthRule, OrderBy};
use crate::engine::tally::count_record;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// SummaryOptions - 汇总选项
// ==========================================
// 排序约定:
// - 客户区域汇总 (阈值口径): OrderBy::Key
// - 区域+品名汇总 (备注口径): OrderBy::Insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub order_by: OrderBy,
    pub rule: HealthRule,
    pub include_total: bool,
}

impl SummaryOptions {
    /// 阈值口径,按键升序,带合计行
    pub fn threshold_report() -> Self {
        Self {
            order_by: OrderBy::Key,
            rule: HealthRule::Threshold,
            include_total: true,
        }
    }

    /// 备注口径,按首次出现顺序
    pub fn remarks_report() -> Self {
        Self {
            order_by: OrderBy::Insertion,
            rule: HealthRule::Remarks,
            include_total: false,
        }
    }

    pub fn with_total(mut self, include_total: bool) -> Self {
        self.include_total = include_total;
        self
    }

    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }
}

// ==========================================
// SummaryAggregator - 分组汇总引擎
// ==========================================
// 红线: 无状态引擎,同一输入多次调用结果一致
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator {
    options: SummaryOptions,
}

impl SummaryAggregator {
    pub fn new(options: SummaryOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SummaryOptions {
        self.options
    }

    /// 分组汇总
    ///
    /// # 参数
    /// - `records`: 记录快照
    /// - `group_key`: 分组键函数 (空字段归入占位标签)
    /// - `filter`: 可选过滤条件,先于分组执行
    ///
    /// # 返回
    /// 完整物化的汇总表
    pub fn summarize<K, F>(
        &self,
        records: &[EquipmentRecord],
        group_key: F,
        filter: Option<&dyn Fn(&EquipmentRecord) -> bool>,
    ) -> SummaryTable<K>
    where
        K: GroupKey,
        F: Fn(&EquipmentRecord) -> K,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut rows: Vec<SummaryRow<K>> = Vec::new();
        let mut matched = 0usize;

        for record in records
            .iter()
            .filter(|r| filter.map_or(true, |f| f(*r)))
        {
            matched += 1;
            let key = group_key(record).normalized();
            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    rows.push(SummaryRow {
                        key: key.clone(),
                        tally: HealthTally::default(),
                    });
                    index.insert(key, rows.len() - 1);
                    rows.len() - 1
                }
            };
            count_record(&mut rows[slot].tally, record, self.options.rule);
        }

        if self.options.order_by == OrderBy::Key {
            rows.sort_by(|a, b| a.key.cmp(&b.key));
        }

        let total = if self.options.include_total {
            let mut sum = HealthTally::default();
            for row in &rows {
                sum.absorb(&row.tally);
            }
            Some(sum)
        } else {
            None
        };

        tracing::debug!(
            input = records.len(),
            matched,
            groups = rows.len(),
            rule = %self.options.rule,
            "汇总完成"
        );

        SummaryTable { rows, total }
    }

    /// 按区域汇总
    pub fn by_area(
        &self,
        records: &[EquipmentRecord],
        filter: Option<&dyn Fn(&EquipmentRecord) -> bool>,
    ) -> SummaryTable<AreaKey> {
        self.summarize(records, area_key, filter)
    }

    /// 按区域 + 客户汇总
    pub fn by_area_customer(
        &self,
        records: &[EquipmentRecord],
        filter: Option<&dyn Fn(&EquipmentRecord) -> bool>,
    ) -> SummaryTable<AreaCustomerKey> {
        self.summarize(records, area_customer_key, filter)
    }

    /// 按区域 + 品名汇总
    pub fn by_area_description(
        &self,
        records: &[EquipmentRecord],
        filter: Option<&dyn Fn(&EquipmentRecord) -> bool>,
    ) -> SummaryTable<AreaDescriptionKey> {
        self.summarize(records, area_description_key, filter)
    }
}

// ==========================================
// 常用分组键与过滤条件
// ==========================================

pub fn area_key(record: &EquipmentRecord) -> AreaKey {
    AreaKey {
        area: record.area.clone(),
    }
}

pub fn area_customer_key(record: &EquipmentRecord) -> AreaCustomerKey {
    AreaCustomerKey {
        area: record.area.clone(),
        customer: record.customer.clone(),
    }
}

pub fn area_description_key(record: &EquipmentRecord) -> AreaDescriptionKey {
    AreaDescriptionKey {
        area: record.area.clone(),
        description: record.item_description.clone(),
    }
}

/// 客户过滤: 去空白后不区分大小写比较
pub fn customer_filter(customer: &str) -> impl Fn(&EquipmentRecord) -> bool + '_ {
    let wanted = customer.trim();
    move |record: &EquipmentRecord| record.customer.trim().eq_ignore_ascii_case(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(area: &str, customer: &str, desc: &str, usage: i64, remarks: &str) -> EquipmentRecord {
        EquipmentRecord::without_transaction(
            format!("{}-{}-{}", area, customer, usage),
            desc,
            customer,
            "M1",
            area,
        )
        .with_usage(usage, remarks)
    }

    #[test]
    fn test_customer_filter_and_area_grouping() {
        let records = vec![
            rec("A", "TRC", "ICT", 0, "GOOD"),
            rec("A", "TRC", "ICT", 0, "NG"),
            rec("B", "EPPI", "ICT", 0, "GOOD"),
        ];
        let trc = customer_filter("TRC");
        let aggregator = SummaryAggregator::new(SummaryOptions::default());
        let table = aggregator.by_area(&records, Some(&trc));

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].key.area, "A");
        assert_eq!(
            table.rows[0].tally,
            HealthTally {
                total: 2,
                good: 1,
                not_good: 1
            }
        );
        assert!(table.total.is_none());
    }

    #[test]
    fn test_order_by_key_vs_insertion() {
        let records = vec![
            rec("SMT", "TRC", "ICT", 0, "GOOD"),
            rec("AOI", "TRC", "ICT", 0, "GOOD"),
            rec("FCT", "TRC", "ICT", 0, "NG"),
            rec("AOI", "TRC", "ICT", 0, "NG"),
        ];

        let by_key = SummaryAggregator::new(SummaryOptions::default()).by_area(&records, None);
        let labels: Vec<String> = by_key.rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["AOI", "FCT", "SMT"]);

        let by_insertion = SummaryAggregator::new(
            SummaryOptions::default().with_order(OrderBy::Insertion),
        )
        .by_area(&records, None);
        let labels: Vec<String> = by_insertion.rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["SMT", "AOI", "FCT"]);
        assert_eq!(by_insertion.rows[1].tally.total, 2);
    }

    #[test]
    fn test_blank_keys_grouped_under_sentinel() {
        let records = vec![
            rec("", "TRC", "", 0, "GOOD"),
            rec("  ", "TRC", "", 0, "NG"),
            rec("SMT", "TRC", "ICT", 0, "GOOD"),
        ];
        let table = SummaryAggregator::new(SummaryOptions::remarks_report())
            .by_area_description(&records, None);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key.area, "N/A");
        assert_eq!(table.rows[0].key.description, "Unknown");
        assert_eq!(table.rows[0].tally.total, 2);
        assert_eq!(table.grand_total(), 3);
    }

    #[test]
    fn test_threshold_rule_with_total_row() {
        let records = vec![
            rec("B", "TRC", "ICT", 1000, "GOOD"),
            rec("A", "TRC", "ICT", 10, "NG"),
            rec("A", "TRC", "ICT", 850, ""),
            rec("B", "TRC", "ICT", 5, "NO TRANSACTION"),
        ];
        let table = SummaryAggregator::new(SummaryOptions::threshold_report()).by_area(&records, None);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key.area, "A");
        assert_eq!(table.rows[0].tally.good, 2);
        assert_eq!(table.rows[0].tally.not_good, 0);
        assert_eq!(table.rows[1].tally.good, 1);
        assert_eq!(table.rows[1].tally.not_good, 1);
        assert_eq!(
            table.total,
            Some(HealthTally {
                total: 4,
                good: 3,
                not_good: 1
            })
        );
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records = vec![
            rec("SMT", "TRC", "ICT", 0, "GOOD"),
            rec("AOI", "EPPI", "FCT", 900, "NG"),
            rec("SMT", "EPPI", "ICT", 1200, "other"),
        ];
        let aggregator = SummaryAggregator::new(SummaryOptions::default().with_total(true));
        let first = aggregator.by_area_customer(&records, None);
        let second = aggregator.by_area_customer(&records, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sum_of_group_totals_equals_filtered_count() {
        let mut records = Vec::new();
        let areas = ["SMT", "AOI", "", "FCT"];
        let customers = ["TRC", "EPPI", "trc "];
        let remarks = ["GOOD", "NG", "NO TRANSACTION", "ok?"];
        for i in 0..60 {
            records.push(rec(
                areas[i % areas.len()],
                customers[i % customers.len()],
                if i % 5 == 0 { "" } else { "ICT" },
                (i as i64) * 25,
                remarks[i % remarks.len()],
            ));
        }

        let trc = customer_filter("TRC");
        let expected = records.iter().filter(|r| trc(*r)).count();
        for options in [SummaryOptions::threshold_report(), SummaryOptions::remarks_report()] {
            let aggregator = SummaryAggregator::new(options);
            let table = aggregator.by_area_description(&records, Some(&trc));
            assert_eq!(table.grand_total(), expected);
            for row in &table.rows {
                assert!(row.tally.good + row.tally.not_good <= row.tally.total);
            }

            let all = aggregator.by_area(&records, None);
            assert_eq!(all.grand_total(), records.len());
        }
    }

    #[test]
    fn test_custom_string_key() {
        let records = vec![
            rec("SMT", "TRC", "ICT", 0, "GOOD"),
            rec("SMT", "EPPI", "ICT", 0, "GOOD"),
        ];
        let table: SummaryTable<String> = SummaryAggregator::default()
            .summarize(&records, |r| r.customer.to_lowercase(), None);
        let labels: Vec<String> = table.rows.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["eppi", "trc"]);
    }
}
