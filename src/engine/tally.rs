// ==========================================
// 治具使用监控系统 - 好/不良计数
// ==========================================
// 两套口径,分别命名,不得混用:
// - 备注口径: remarks 转大写去空白后 == "GOOD" / "NG"
// - 阈值口径: 未达上限计好, 达到上限计不良
// ==========================================

use crate::domain::equipment::EquipmentRecord;
use crate::domain::summary::HealthTally;
use crate::domain::types::{HealthRule, RemarksTag};
use crate::engine::classifier::UsageClassifier;

/// 将单条记录按指定口径计入 tally
pub(crate) fn count_record(tally: &mut HealthTally, record: &EquipmentRecord, rule: HealthRule) {
    tally.total += 1;
    match rule {
        HealthRule::Remarks => match RemarksTag::parse(&record.remarks) {
            RemarksTag::Good => tally.good += 1,
            RemarksTag::NotGood => tally.not_good += 1,
            RemarksTag::Uncategorized => {}
        },
        HealthRule::Threshold => {
            if UsageClassifier
                .classify(record.usage_count, record.limit)
                .is_exceeded()
            {
                tally.not_good += 1;
            } else {
                tally.good += 1;
            }
        }
    }
}

/// 按备注统计好/不良
///
/// 其他备注 (含 "NO TRANSACTION"、空串) 只计入 total
pub fn tally_by_remarks<'a, I>(records: I) -> HealthTally
where
    I: IntoIterator<Item = &'a EquipmentRecord>,
{
    tally_with_rule(records, HealthRule::Remarks)
}

/// 按使用上限统计好/不良
///
/// WARNING 级别仍计为好
pub fn tally_by_threshold<'a, I>(records: I) -> HealthTally
where
    I: IntoIterator<Item = &'a EquipmentRecord>,
{
    tally_with_rule(records, HealthRule::Threshold)
}

/// 按指定口径统计
pub fn tally_with_rule<'a, I>(records: I, rule: HealthRule) -> HealthTally
where
    I: IntoIterator<Item = &'a EquipmentRecord>,
{
    let mut tally = HealthTally::default();
    for record in records {
        count_record(&mut tally, record, rule);
    }
    tally
}
