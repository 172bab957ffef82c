// ==========================================
// 治具使用监控系统 - 序列号带出
// ==========================================
// 精确字符串匹配; 大小写规范化由调用方负责
// (扫码输入先经 normalize_scanned_serial 处理)
// ==========================================

use crate::domain::equipment::EquipmentRecord;
use crate::domain::masterlist::{MasterlistItem, SerialDetails, SerialLookup};

/// 扫码输入规范化: 去首尾空白并转大写
pub fn normalize_scanned_serial(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ==========================================
// Trait: SerialDirectory - 序列号目录
// ==========================================
pub trait SerialDirectory {
    /// 按序列号精确查找
    fn find_details(&self, serial: &str) -> Option<SerialDetails>;

    /// 查找并包装为带出结果
    fn lookup(&self, serial: &str) -> SerialLookup {
        match self.find_details(serial) {
            Some(details) => SerialLookup::found(details),
            None => SerialLookup::not_found(),
        }
    }
}

impl SerialDirectory for [EquipmentRecord] {
    fn find_details(&self, serial: &str) -> Option<SerialDetails> {
        self.iter().find(|r| r.serial == serial).map(|r| SerialDetails {
            description: r.item_description.clone(),
            customer: r.customer.clone(),
            area: r.area.clone(),
            model: r.model.clone(),
        })
    }
}

impl SerialDirectory for [MasterlistItem] {
    fn find_details(&self, serial: &str) -> Option<SerialDetails> {
        self.iter()
            .find(|item| item.serial_number == serial)
            .map(MasterlistItem::details)
    }
}
