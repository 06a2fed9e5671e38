// ==========================================
// 库存调拨平衡系统 - 命令处理
// ==========================================
// 职责: 命令行参数 → API 调用 → 终端输出文本
// ==========================================

use crate::api::{AllocationRequest, ApiError, ApiResult};
use crate::app::cli::{Commands, ConfigAction, OutputFormat, RunArgs};
use crate::app::state::AppState;
use crate::config::ConfigEntry;
use crate::i18n::t_with_args;
use std::fmt::Write;

/// 执行一条命令，返回需写到 stdout 的文本
pub fn execute(state: &AppState, command: &Commands) -> ApiResult<String> {
    match command {
        Commands::Run(args) => run_allocation(state, args),
        Commands::Config { action } => handle_config(state, action),
    }
}

/// run: 加载 → 分配 → 输出（可选导出 CSV）
pub fn run_allocation(state: &AppState, args: &RunArgs) -> ApiResult<String> {
    let api = &state.allocation_api;
    let dataset = match (&args.workbook, &args.shortages, &args.excesses) {
        (Some(workbook), _, _) => api.load_workbook(workbook)?,
        (None, Some(shortages), Some(excesses)) => api.load_csv_pair(shortages, excesses)?,
        _ => {
            return Err(ApiError::InvalidInput(
                "需要 --workbook，或同时提供 --shortages 与 --excesses".to_string(),
            ))
        }
    };

    let request = AllocationRequest {
        mode: args.mode,
        search: args.search.clone(),
        split_by_part: args.split_by_part,
    };
    let report = api.run(dataset, &request)?;

    let exported = if args.export || args.export_dir.is_some() {
        api.export_csv(&report, args.export_dir.as_deref())?
    } else {
        Vec::new()
    };

    match args.format {
        OutputFormat::Json => {
            for path in &exported {
                tracing::info!(path = %path.display(), "已导出");
            }
            report.to_json()
        }
        OutputFormat::Table => {
            let mut out = report.render_text();
            for path in &exported {
                let path = path.display().to_string();
                let _ = writeln!(out, "{}", t_with_args("report.exported", &[("path", path.as_str())]));
            }
            Ok(out)
        }
    }
}

/// config: list / get / set
pub fn handle_config(state: &AppState, action: &ConfigAction) -> ApiResult<String> {
    let api = &state.config_api;
    match action {
        ConfigAction::List => {
            let mut out = String::new();
            for entry in api.list_configs()? {
                let _ = writeln!(out, "{}", format_entry(&entry));
            }
            Ok(out)
        }
        ConfigAction::Get { key } => Ok(format!("{}\n", format_entry(&api.get_config(key)?))),
        ConfigAction::Set { key, value } => {
            let entry = api.update_config(key, value)?;
            Ok(format!(
                "{}\n",
                t_with_args(
                    "config.updated",
                    &[("key", entry.key.as_str()), ("value", entry.value.as_str())]
                )
            ))
        }
    }
}

fn format_entry(entry: &ConfigEntry) -> String {
    match &entry.updated_at {
        Some(updated_at) => format!("{} = {}  ({})", entry.key, entry.value, updated_at),
        None => format!("{} = {}", entry.key, entry.value),
    }
}
