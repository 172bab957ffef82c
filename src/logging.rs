// ==========================================
// 日志系统初始化
// ==========================================
// 命令行输出约定: stdout 只写汇总 JSON / 导出结果,日志一律写 stderr
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化命令行程序日志（jig-monitoring / seed_demo_db）
///
/// 日志写到 stderr,`jig-monitoring > summary.json` 重定向得到的是纯 JSON。
/// 级别由 RUST_LOG 控制,未设置时为 info,
/// 例如 `RUST_LOG=jig_monitoring::engine=debug` 可查看汇总分组明细。
///
/// 只能调用一次。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 集成测试用: debug 级别,输出交给 libtest 捕获
///
/// 每个测试环境都会调用,重复初始化被忽略
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
