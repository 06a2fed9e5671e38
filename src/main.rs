// ==========================================
// 库存调拨平衡系统 - 命令行主入口
// ==========================================

use anyhow::Context;
use clap::Parser;
use stock_rebalancer::app::{execute, get_default_db_path, AppState, Cli};
use stock_rebalancer::logging;

fn run(cli: Cli) -> anyhow::Result<String> {
    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    tracing::info!(
        version = stock_rebalancer::VERSION,
        db = %db_path.display(),
        "{} 启动",
        stock_rebalancer::APP_NAME
    );

    let state = AppState::new(&db_path)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("无法初始化应用状态: {}", db_path.display()))?;
    state.apply_locale(cli.locale.as_deref());

    Ok(execute(&state, &cli.command)?)
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match run(cli) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            tracing::error!(error = %format!("{:#}", err), "命令执行失败");
            eprintln!("错误: {:#}", err);
            std::process::exit(1);
        }
    }
}
