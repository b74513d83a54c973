// ==========================================
// 专利年费计算 API
// ==========================================
// 职责: 文件进、报告出的一站式入口
// 流程: 读取专利表 + 费用表 → 编排器计算 → 概览汇总 → (可选) 写出 CSV / JSON
// ==========================================

use crate::api::error::ApiResult;
use crate::config::CalculatorConfig;
use crate::domain::fee_table::{CountryCatalogEntry, FeeTable};
use crate::domain::patent::PatentRecord;
use crate::engine::orchestrator::{CalculationOutcome, FeeOrchestrator};
use crate::engine::overview::{FeeOverview, OverviewBuilder};
use crate::export::{OverviewJsonWriter, ResultsCsvWriter};
use crate::importer::{FeeTableReader, PatentRecordExtractor, UniversalFileParser};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// 计算报告
#[derive(Debug, Clone, Serialize)]
pub struct CalculationReport {
    pub outcome: CalculationOutcome,
    pub overview: FeeOverview,
    /// 计算耗时（毫秒）
    pub elapsed_ms: u64,
}

impl CalculationReport {
    pub fn grand_total(&self) -> f64 {
        self.outcome.results.grand_total().unwrap_or(0.0)
    }
}

pub struct CalculationApi {
    orchestrator: FeeOrchestrator,
    patent_extractor: PatentRecordExtractor,
    fee_reader: FeeTableReader,
}

impl Default for CalculationApi {
    fn default() -> Self {
        Self::new(FeeOrchestrator::default())
    }
}

impl CalculationApi {
    pub fn new(orchestrator: FeeOrchestrator) -> Self {
        Self {
            orchestrator,
            patent_extractor: PatentRecordExtractor::new(),
            fee_reader: FeeTableReader::new(),
        }
    }

    /// 读取专利表（.csv / .xlsx）
    pub fn load_patents<P: AsRef<Path>>(&self, path: P) -> ApiResult<Vec<PatentRecord>> {
        let raw = UniversalFileParser.parse(path)?;
        Ok(self.patent_extractor.extract(&raw)?)
    }

    /// 读取费用表（.csv / .xlsx）
    pub fn load_fee_table<P: AsRef<Path>>(&self, path: P) -> ApiResult<FeeTable> {
        Ok(self.fee_reader.read_file(path)?)
    }

    /// 对内存中的数据计算
    pub fn calculate(
        &self,
        patents: &[PatentRecord],
        fee_table: &FeeTable,
        today: NaiveDate,
    ) -> ApiResult<CalculationReport> {
        let started = Instant::now();
        let outcome = self.orchestrator.run(patents, fee_table, today)?;
        let overview = OverviewBuilder.build(&outcome.results);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        info!(
            run_id = %outcome.run_id,
            countries = overview.country_count,
            grand_total = overview.grand_total,
            elapsed_ms,
            "计算报告生成完成"
        );

        Ok(CalculationReport {
            outcome,
            overview,
            elapsed_ms,
        })
    }

    /// 读取两张表后计算
    pub fn calculate_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        patents_path: P,
        fees_path: Q,
        today: NaiveDate,
    ) -> ApiResult<CalculationReport> {
        let patents = self.load_patents(patents_path.as_ref())?;
        let fee_table = self.load_fee_table(fees_path.as_ref())?;

        info!(
            patents_file = %patents_path.as_ref().display(),
            fees_file = %fees_path.as_ref().display(),
            patents = patents.len(),
            fee_columns = fee_table.columns().len(),
            "输入表格读取完成"
        );

        self.calculate(&patents, &fee_table, today)
    }

    /// 按配置计算；配置了输出路径时同时写出结果 CSV
    pub fn calculate_with_config<P: AsRef<Path>>(
        &self,
        config: &CalculatorConfig,
        patents_path: P,
    ) -> ApiResult<CalculationReport> {
        let report = self.calculate_from_files(
            patents_path,
            &config.fee_table_path,
            config.reference_date_or_today(),
        )?;

        if let Some(output) = &config.output_path {
            self.write_results(&report, output)?;
        }

        Ok(report)
    }

    /// 费用表中的国家目录
    pub fn country_catalog<P: AsRef<Path>>(&self, fees_path: P) -> ApiResult<Vec<CountryCatalogEntry>> {
        Ok(self.load_fee_table(fees_path)?.country_catalog())
    }

    /// 写出结果 CSV
    pub fn write_results<P: AsRef<Path>>(&self, report: &CalculationReport, path: P) -> ApiResult<()> {
        let path = path.as_ref();
        ResultsCsvWriter.write_file(&report.outcome.results, path)?;
        info!(path = %path.display(), rows = report.outcome.results.len(), "结果 CSV 已写出");
        Ok(())
    }

    /// 写出概览 JSON
    pub fn write_overview<P: AsRef<Path>>(&self, report: &CalculationReport, path: P) -> ApiResult<()> {
        let path = path.as_ref();
        OverviewJsonWriter.write_file(&report.overview, path)?;
        info!(path = %path.display(), "概览 JSON 已写出");
        Ok(())
    }
}
