// ==========================================
// 治具使用监控系统 - 列表视图 (搜索 + 分页)
// ==========================================
// 视图状态显式传入,无全局分页变量
// 页码从 1 开始,超出范围时夹到 [1, total_pages]
// total_pages = max(1, ceil(n / page_size))
// ==========================================

use crate::domain::equipment::{ClassifiedRecord, EquipmentRecord};
use crate::domain::masterlist::MasterlistItem;
use serde::{Deserialize, Serialize};

// ==========================================
// 搜索范围
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchScope {
    /// 仅匹配序列号 (看板)
    #[default]
    SerialOnly,
    /// 匹配所有文本字段 (主数据维护)
    AllFields,
}

// ==========================================
// Trait: Searchable - 可搜索行
// ==========================================
pub trait Searchable {
    fn serial(&self) -> &str;

    fn text_fields(&self) -> Vec<&str>;

    /// 不区分大小写的子串匹配; needle 已转小写
    fn matches(&self, needle: &str, scope: SearchScope) -> bool {
        match scope {
            SearchScope::SerialOnly => self.serial().to_lowercase().contains(needle),
            SearchScope::AllFields => self
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle)),
        }
    }
}

impl Searchable for EquipmentRecord {
    fn serial(&self) -> &str {
        &self.serial
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.serial.as_str(),
            self.item_description.as_str(),
            self.customer.as_str(),
            self.model.as_str(),
            self.area.as_str(),
            self.remarks.as_str(),
        ]
    }
}

impl Searchable for ClassifiedRecord {
    fn serial(&self) -> &str {
        self.record.serial()
    }

    fn text_fields(&self) -> Vec<&str> {
        self.record.text_fields()
    }
}

impl Searchable for MasterlistItem {
    fn serial(&self) -> &str {
        &self.serial_number
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.serial_number.as_str(),
            self.stock_control.as_str(),
            self.item_description.as_str(),
            self.customer.as_str(),
            self.model.as_str(),
            self.area.as_str(),
            self.line.as_str(),
            self.remarks.as_str(),
            self.status.as_str(),
        ]
    }
}

// ==========================================
// TableView - 视图状态 (不可变值)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub scope: SearchScope,
}

impl TableView {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            search: String::new(),
            scope: SearchScope::default(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>, scope: SearchScope) -> Self {
        self.search = search.into();
        self.scope = scope;
        self
    }
}

// ==========================================
// TablePage - 当前页数据 + 分页元信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// 搜索 + 分页
///
/// # 说明
/// - 空白搜索词匹配全部记录
/// - 搜索保持原始相对顺序
pub fn paginate<T: Searchable + Clone>(records: &[T], view: &TableView) -> TablePage<T> {
    let needle = view.search.trim().to_lowercase();
    let matched: Vec<&T> = if needle.is_empty() {
        records.iter().collect()
    } else {
        records
            .iter()
            .filter(|r| r.matches(&needle, view.scope))
            .collect()
    };

    let page_size = view.page_size.max(1);
    let total_rows = matched.len();
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = view.page.clamp(1, total_pages);

    let rows = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    TablePage {
        rows,
        page,
        page_size,
        total_pages,
        total_rows,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}
