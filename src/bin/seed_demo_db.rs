// ==========================================
// 治具使用监控系统 - 演示数据库重置与填充
// ==========================================
// 用法: seed_demo_db [db_path] [jig_count]
// 已存在的数据库先备份为 <db_path>.bak.<时间戳>
// ==========================================

use anyhow::Context;
use chrono::Local;
use std::fs;
use std::path::Path;

use jig_monitoring::app::{get_default_db_path, AppState};
use jig_monitoring::domain::{MasterlistItem, TransactionDirection, TransactionForm};
use jig_monitoring::logging;

const DEFAULT_JIG_COUNT: usize = 60;

const CUSTOMERS: [&str; 3] = ["TRC", "EPPI", "ACME"];
const AREAS: [&str; 4] = ["SMT", "FCT", "ICT", "PACKING"];
const DESCRIPTIONS: [&str; 4] = ["ICT FIXTURE", "FCT JIG", "STENCIL", "PALLET"];
const LINES: [&str; 3] = ["L1", "L2", "L3"];

fn main() -> anyhow::Result<()> {
    logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let jig_count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_JIG_COUNT)
        .max(1);

    backup_and_reset_db(&db_path)?;

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    seed_demo_scenario(&state, jig_count)?;
    print_quick_counts(&state)?;

    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> anyhow::Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)
        .with_context(|| format!("备份数据库失败: {} -> {}", db_path, backup_path))?;
    fs::remove_file(path).with_context(|| format!("删除旧数据库失败: {}", db_path))?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_scenario(state: &AppState, jig_count: usize) -> anyhow::Result<()> {
    for idx in 0..jig_count {
        let item = demo_item(idx);
        state.masterlist_api.create_item(item.clone())?;

        // 每 5 个留一个无交易
        if idx % 5 == 4 {
            continue;
        }

        let usage = demo_usage(idx);
        state
            .transaction_api
            .record_incoming(demo_form(&item, usage, TransactionDirection::Incoming))?;

        if idx % 3 == 0 {
            state
                .transaction_api
                .record_outgoing(demo_form(&item, usage, TransactionDirection::Outgoing))?;
        }
    }
    Ok(())
}

fn demo_item(idx: usize) -> MasterlistItem {
    MasterlistItem {
        item_id: None,
        serial_number: format!("JIG-{:05}", idx + 1),
        stock_control: format!("SC-{:04}", (idx % 40) + 1),
        item_description: DESCRIPTIONS[idx % DESCRIPTIONS.len()].to_string(),
        customer: CUSTOMERS[idx % CUSTOMERS.len()].to_string(),
        model: format!("MODEL-{}", (idx % 7) + 1),
        area: AREAS[(idx / 2) % AREAS.len()].to_string(),
        line: LINES[idx % LINES.len()].to_string(),
        remarks: if idx % 6 == 5 { "NG" } else { "GOOD" }.to_string(),
        status: "ACTIVE".to_string(),
    }
}

/// 使用次数覆盖 OK / WARNING / EXCEEDED 三档
fn demo_usage(idx: usize) -> i64 {
    match idx % 8 {
        0 => 1000,
        1 => 1250,
        2 => 800,
        3 => 950,
        _ => ((idx * 97) % 780) as i64,
    }
}

fn demo_form(item: &MasterlistItem, usage: i64, direction: TransactionDirection) -> TransactionForm {
    let status = match direction {
        TransactionDirection::Incoming => "IN",
        TransactionDirection::Outgoing => "OUT",
    };
    TransactionForm {
        serial: item.serial_number.clone(),
        item_description: item.item_description.clone(),
        customer: item.customer.clone(),
        model: item.model.clone(),
        area: item.area.clone(),
        line: item.line.clone(),
        usage_count: usage,
        status: status.to_string(),
        remarks: item.remarks.clone(),
    }
}

fn print_quick_counts(state: &AppState) -> anyhow::Result<()> {
    let view = state.masterlist_api.masterlist_view(1, "")?;
    let masterlist = state.masterlist_api.list_items(&view)?;
    let incoming = state
        .transaction_api
        .list_transactions(TransactionDirection::Incoming)?;
    let outgoing = state
        .transaction_api
        .list_transactions(TransactionDirection::Outgoing)?;

    eprintln!("Seeded {}", state.db_path);
    eprintln!("  masterlist:           {}", masterlist.total_rows);
    eprintln!("  transaction_incoming: {}", incoming.len());
    eprintln!("  transaction_outgoing: {}", outgoing.len());
    Ok(())
}
