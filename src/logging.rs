// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 日志写入 stderr，stdout 保留给报表输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志默认级别（RUST_LOG 未设置时）
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// 初始化日志系统
///
/// # 参数
/// - json: 是否输出 JSON 结构化日志
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: warn）
///   例如: RUST_LOG=debug 或 RUST_LOG=stock_rebalancer::engine=trace
///
/// # 示例
/// ```no_run
/// use stock_rebalancer::logging;
/// logging::init(false);
/// ```
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略（例如库被多次调用）
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
