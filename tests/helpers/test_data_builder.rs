// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use jig_monitoring::domain::{MasterlistItem, TransactionForm};

// ==========================================
// MasterlistItem 构建器
// ==========================================

pub struct JigBuilder {
    item: MasterlistItem,
}

impl JigBuilder {
    pub fn new(serial: &str) -> Self {
        Self {
            item: MasterlistItem {
                item_id: None,
                serial_number: serial.to_string(),
                stock_control: "SC-0001".to_string(),
                item_description: "ICT FIXTURE".to_string(),
                customer: "TRC".to_string(),
                model: "MODEL-1".to_string(),
                area: "SMT".to_string(),
                line: "L1".to_string(),
                remarks: "GOOD".to_string(),
                status: "ACTIVE".to_string(),
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.item.item_description = description.to_string();
        self
    }

    pub fn customer(mut self, customer: &str) -> Self {
        self.item.customer = customer.to_string();
        self
    }

    pub fn area(mut self, area: &str) -> Self {
        self.item.area = area.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.item.model = model.to_string();
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.item.line = line.to_string();
        self
    }

    pub fn build(self) -> MasterlistItem {
        self.item
    }
}

// ==========================================
// TransactionForm 构建器
// ==========================================

pub struct TransactionFormBuilder {
    form: TransactionForm,
}

impl TransactionFormBuilder {
    pub fn from_item(item: &MasterlistItem) -> Self {
        Self {
            form: TransactionForm {
                serial: item.serial_number.clone(),
                item_description: item.item_description.clone(),
                customer: item.customer.clone(),
                model: item.model.clone(),
                area: item.area.clone(),
                line: item.line.clone(),
                usage_count: 0,
                status: "IN".to_string(),
                remarks: "GOOD".to_string(),
            },
        }
    }

    pub fn usage(mut self, usage_count: i64) -> Self {
        self.form.usage_count = usage_count;
        self
    }

    pub fn remarks(mut self, remarks: &str) -> Self {
        self.form.remarks = remarks.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.form.status = status.to_string();
        self
    }

    pub fn serial(mut self, serial: &str) -> Self {
        self.form.serial = serial.to_string();
        self
    }

    pub fn build(self) -> TransactionForm {
        self.form
    }
}
