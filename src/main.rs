// ==========================================
// 治具使用监控系统 - 命令行入口
// ==========================================
// 用法:
//   jig-monitoring                   输出仪表盘汇总 (JSON)
//   jig-monitoring --export <file>   导出治具使用列表 (CSV)
// 数据库路径: JIG_MONITORING_DB 或用户数据目录
// ==========================================

use std::fs::File;
use std::io::BufWriter;

use anyhow::{bail, Context};
use jig_monitoring::app::{get_default_db_path, AppState};
use jig_monitoring::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!(version = jig_monitoring::VERSION, "{}", jig_monitoring::APP_NAME);

    let db_path = get_default_db_path();
    let state = AppState::new(db_path.clone())
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("打开数据库失败: {}", db_path))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("--export") => {
            let target = args
                .get(1)
                .context("用法: jig-monitoring --export <file>")?;
            let file = File::create(target)
                .with_context(|| format!("无法创建导出文件: {}", target))?;
            let rows = state
                .dashboard_api
                .export_equipment_csv(BufWriter::new(file))
                .context("导出治具使用列表失败")?;
            tracing::info!(path = %target, rows, "已导出");
        }
        Some(other) => {
            bail!("未知参数: {}", other);
        }
        None => {
            let summary = state
                .dashboard_api
                .dashboard_summary()
                .context("查询仪表盘汇总失败")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
