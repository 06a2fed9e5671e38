// ==========================================
// 库存调拨平衡系统 - 命令行定义
// ==========================================
// 工具: clap derive
// ==========================================

use crate::domain::CalculationMode;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 报表输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "stock-rebalancer")]
#[command(version)]
#[command(about = "Rebalance stock by moving excess from main warehouses to warehouses short of parts")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config database path (defaults to STOCK_REBALANCER_DB_PATH or the user data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Report language (zh-CN, en). Uses config value if not specified.
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an allocation and print the report
    Run(RunArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Workbook with "Shortages" and "Excesses" sheets
    #[arg(long, short = 'w', conflicts_with_all = ["shortages", "excesses"], required_unless_present = "shortages")]
    pub workbook: Option<PathBuf>,

    /// Shortages CSV file
    #[arg(long, requires = "excesses")]
    pub shortages: Option<PathBuf>,

    /// Excesses CSV file
    #[arg(long, requires = "shortages")]
    pub excesses: Option<PathBuf>,

    /// Calculation mode (independent-default, independent-original, rolling). Uses config value if not specified.
    #[arg(long, short = 'm')]
    pub mode: Option<CalculationMode>,

    /// Only show rows containing this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Allocate each part separately
    #[arg(long)]
    pub split_by_part: bool,

    /// Export the four report tables as CSV into the configured export dir
    #[arg(long)]
    pub export: bool,

    /// Export the four report tables as CSV into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// List all configuration values
    List,

    /// Show one configuration value
    Get {
        key: String,
    },

    /// Update one configuration value
    Set {
        key: String,
        value: String,
    },
}
