// ==========================================
// 治具使用监控系统 - 出入库交易 API
// ==========================================
// 职责: 扫码带出、入库/出库录入
// 约束: 所有字段必填; 序列号必须存在于主数据; 使用次数非负
// 同一序列号重复提交时覆盖 (后写生效)
// ==========================================

use std::sync::Arc;

use chrono::Local;

use crate::api::error::{ApiError, ApiResult, MSG_SERIAL_NOT_FOUND};
use crate::domain::masterlist::SerialLookup;
use crate::domain::transaction::{JigTransaction, TransactionDirection, TransactionForm};
use crate::engine::lookup::normalize_scanned_serial;
use crate::repository::masterlist_repo::MasterlistRepository;
use crate::repository::transaction_repo::TransactionRepository;

// ==========================================
// TransactionApi - 出入库交易 API
// ==========================================
pub struct TransactionApi {
    masterlist_repo: Arc<MasterlistRepository>,
    transaction_repo: Arc<TransactionRepository>,
}

impl TransactionApi {
    pub fn new(
        masterlist_repo: Arc<MasterlistRepository>,
        transaction_repo: Arc<TransactionRepository>,
    ) -> Self {
        Self {
            masterlist_repo,
            transaction_repo,
        }
    }

    /// 入库扫码带出
    pub fn incoming_autofill(&self, raw_serial: &str) -> ApiResult<SerialLookup> {
        let serial = normalize_scanned_serial(raw_serial);
        if serial.is_empty() {
            return Ok(SerialLookup::not_found());
        }
        Ok(self.masterlist_repo.lookup_serial(&serial)?)
    }

    /// 出库扫码带出（附带最近一次入库使用次数,无入库记录时为 0）
    pub fn outgoing_autofill(&self, raw_serial: &str) -> ApiResult<SerialLookup> {
        let serial = normalize_scanned_serial(raw_serial);
        let lookup = self.incoming_autofill(&serial)?;
        if !lookup.found {
            return Ok(lookup);
        }

        let usage = self
            .transaction_repo
            .latest_incoming_usage(&serial)?
            .unwrap_or(0);
        Ok(lookup.with_usage_count(usage))
    }

    /// 入库录入
    pub fn record_incoming(&self, form: TransactionForm) -> ApiResult<JigTransaction> {
        self.record(TransactionDirection::Incoming, form)
    }

    /// 出库录入
    pub fn record_outgoing(&self, form: TransactionForm) -> ApiResult<JigTransaction> {
        self.record(TransactionDirection::Outgoing, form)
    }

    /// 查询交易列表（最近在前）
    pub fn list_transactions(&self, direction: TransactionDirection) -> ApiResult<Vec<JigTransaction>> {
        Ok(self.transaction_repo.list(direction)?)
    }

    fn record(&self, direction: TransactionDirection, form: TransactionForm) -> ApiResult<JigTransaction> {
        validate_form(&form)?;

        let mut txn = form.into_transaction(direction, Local::now().naive_local());
        let item_id = self
            .masterlist_repo
            .find_id_by_serial(&txn.serial_number)?
            .ok_or_else(|| ApiError::NotFound(MSG_SERIAL_NOT_FOUND.to_string()))?;
        txn.item_id = Some(item_id);

        self.transaction_repo.upsert(item_id, &txn)?;
        tracing::info!(
            direction = %direction,
            serial = %txn.serial_number,
            usage_count = txn.usage_count,
            "交易已录入"
        );
        Ok(txn)
    }
}

fn validate_form(form: &TransactionForm) -> ApiResult<()> {
    let missing: Vec<&str> = form
        .required_fields()
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidInput(format!(
            "必填字段为空: {}",
            missing.join(", ")
        )));
    }

    if form.usage_count < 0 {
        return Err(ApiError::InvalidInput(format!(
            "使用次数不能为负数: {}",
            form.usage_count
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> TransactionForm {
        TransactionForm {
            serial: "SN-001".to_string(),
            item_description: "ICT FIXTURE".to_string(),
            customer: "TRC".to_string(),
            model: "M1".to_string(),
            area: "SMT".to_string(),
            line: "L1".to_string(),
            usage_count: 10,
            status: "IN".to_string(),
            remarks: "GOOD".to_string(),
        }
    }

    #[test]
    fn test_validate_form_accepts_complete_form() {
        assert!(validate_form(&form()).is_ok());
    }

    #[test]
    fn test_validate_form_rejects_negative_usage() {
        let mut f = form();
        f.usage_count = -1;
        assert!(matches!(validate_form(&f), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_form_rejects_blank_remarks() {
        let mut f = form();
        f.remarks = "  ".to_string();
        let err = validate_form(&f).unwrap_err();
        assert!(err.to_string().contains("remarks"));
    }
}
