// ==========================================
// 库存调拨平衡系统 - 调拨分配 API
// ==========================================
// 职责: 加载数据集 → 读取配置 → 运行分配引擎 → 生成报表 / 导出
// ==========================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::config::{AllocationConfigReader, ConfigManager};
use crate::domain::{AllocationRecord, CalculationMode};
use crate::engine::{AllocationEngine, AllocationSummary};
use crate::importer::{AllocationDataset, DatasetLoader};
use crate::report::{render_report, CsvExporter, ReportTables};

/// 分配请求参数（None 表示取配置值）
#[derive(Debug, Clone, Default)]
pub struct AllocationRequest {
    pub mode: Option<CalculationMode>,
    pub search: Option<String>,
    /// 按零件分片计算（每个零件独立争用供给）
    pub split_by_part: bool,
}

/// 一次分配运行的完整报表
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub mode: CalculationMode,
    pub main_location_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub summary: AllocationSummary,
    pub allocations: Vec<AllocationRecord>,
    /// 未过滤的完整表格（导出使用）
    pub tables: ReportTables,
}

impl AllocationReport {
    /// 按搜索词过滤后的表格（页面/终端显示使用）
    pub fn visible_tables(&self) -> ReportTables {
        match &self.search {
            Some(query) => self.tables.filtered(query),
            None => self.tables.clone(),
        }
    }

    pub fn to_json(&self) -> ApiResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::report::ReportError::from(e).into())
    }

    pub fn render_text(&self) -> String {
        render_report(&self.visible_tables(), &self.summary, self.mode.as_str())
    }
}

// ==========================================
// AllocationApi - 调拨分配 API
// ==========================================
pub struct AllocationApi {
    config_manager: Arc<ConfigManager>,
    loader: DatasetLoader,
}

impl AllocationApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self {
            config_manager,
            loader: DatasetLoader::new(),
        }
    }

    /// 从工作簿加载数据集
    pub fn load_workbook<P: AsRef<Path>>(&self, path: P) -> ApiResult<AllocationDataset> {
        Ok(self.loader.load_workbook(path)?)
    }

    /// 从 CSV 文件对加载数据集
    pub fn load_csv_pair<S: AsRef<Path>, E: AsRef<Path>>(
        &self,
        shortages_path: S,
        excesses_path: E,
    ) -> ApiResult<AllocationDataset> {
        Ok(self.loader.load_csv_pair(shortages_path, excesses_path)?)
    }

    /// 运行分配并生成报表
    ///
    /// # 参数
    /// - dataset: 输入数据集（按值传入，单次运行内消费）
    /// - request: 运行参数
    #[instrument(skip(self, dataset), fields(source = %dataset.source))]
    pub fn run(
        &self,
        dataset: AllocationDataset,
        request: &AllocationRequest,
    ) -> ApiResult<AllocationReport> {
        let mode = match request.mode {
            Some(mode) => mode,
            None => self.config_manager.get_calculation_mode()?,
        };
        let main_location_type = self.config_manager.get_main_location_type()?;

        let engine = AllocationEngine::with_main_location_type(main_location_type.clone());
        let outcome = if request.split_by_part {
            engine.allocate_by_part(dataset.shortages, dataset.excesses, mode)?
        } else {
            engine.allocate(dataset.shortages, dataset.excesses, mode)?
        };

        let search = request
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let report = AllocationReport {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            source: dataset.source,
            mode,
            main_location_type,
            search,
            summary: outcome.summary(),
            tables: ReportTables::build(&outcome),
            allocations: outcome.allocations,
        };

        info!(run_id = %report.run_id, mode = %mode, "分配报表已生成");
        Ok(report)
    }

    /// 导出四张完整表格为 CSV
    ///
    /// # 参数
    /// - export_dir: 导出目录（None 时取配置 export_dir）
    pub fn export_csv(
        &self,
        report: &AllocationReport,
        export_dir: Option<&Path>,
    ) -> ApiResult<Vec<PathBuf>> {
        let dir = match export_dir {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(self.config_manager.get_export_dir()?),
        };
        Ok(CsvExporter::new(dir).export_all(&report.tables)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_keys;
    use crate::domain::{ExcessRecord, ShortageRecord};

    fn dataset() -> AllocationDataset {
        AllocationDataset {
            shortages: vec![ShortageRecord::new("W1", 50.0).with_row_number(1)],
            excesses: vec![
                ExcessRecord::new("W2", "MAIN", 20.0, 0.0).with_row_number(1),
                ExcessRecord::new("W3", "OTHER", 100.0, 0.0).with_row_number(2),
            ],
            source: "memory".to_string(),
        }
    }

    #[test]
    fn test_run_uses_configured_mode() {
        let manager = Arc::new(ConfigManager::in_memory().unwrap());
        manager
            .set_global_config_value(config_keys::CALCULATION_MODE, "rolling")
            .unwrap();
        let api = AllocationApi::new(manager);

        let report = api.run(dataset(), &AllocationRequest::default()).unwrap();
        assert_eq!(report.mode, CalculationMode::Rolling);
        assert_eq!(report.summary.total_allocated, 20.0);
        assert_eq!(report.summary.excluded_excess_rows, 1);
        assert_eq!(report.tables.unfulfilled.len(), 1);
    }

    #[test]
    fn test_request_mode_overrides_config() {
        let api = AllocationApi::new(Arc::new(ConfigManager::in_memory().unwrap()));
        let request = AllocationRequest {
            mode: Some(CalculationMode::IndependentOriginal),
            ..Default::default()
        };
        let report = api.run(dataset(), &request).unwrap();
        assert_eq!(report.mode, CalculationMode::IndependentOriginal);
        assert_eq!(report.allocations.len(), 1);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let api = AllocationApi::new(Arc::new(ConfigManager::in_memory().unwrap()));
        let request = AllocationRequest {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let report = api.run(dataset(), &request).unwrap();
        assert!(report.search.is_none());
        assert_eq!(report.visible_tables(), report.tables);
    }

    #[test]
    fn test_json_contains_run_metadata() {
        let api = AllocationApi::new(Arc::new(ConfigManager::in_memory().unwrap()));
        let report = api.run(dataset(), &AllocationRequest::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["mode"], "independent-default");
        assert_eq!(json["run_id"].as_str().map(str::len), Some(36));
        assert_eq!(json["allocations"][0]["quantity"], 20.0);
    }
}
