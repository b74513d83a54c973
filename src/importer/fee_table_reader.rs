// ==========================================
// 专利年费计算引擎 - 费用表读取器
// ==========================================
// 职责: 宽表 → FeeTable（按列拆出策略、名称、费用序列）
// ==========================================

use crate::domain::fee_table::{FeeColumn, FeeTable, METADATA_ROWS};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::RawTable;
use std::path::Path;
use tracing::{debug, info};

const MISSING_METADATA_ROWS: &str = "缺少策略行或名称行";

pub struct FeeTableReader {
    cleaner: DataCleaner,
}

impl Default for FeeTableReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeTableReader {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 从文件读取费用表（.csv / .xlsx）
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<FeeTable> {
        let path = path.as_ref();
        let raw = UniversalFileParser.parse(path)?;
        self.parse_raw_table(raw)
            .map_err(|e| match e {
                ImportError::EmptyFeeTable(reason) => {
                    ImportError::EmptyFeeTable(format!("{}: {}", path.display(), reason))
                }
                other => other,
            })
    }

    /// 原始表格 → FeeTable
    ///
    /// 中间的空行保留（对应费用为 0 的年份），末尾空行去掉。
    pub fn parse_raw_table(&self, raw: RawTable) -> ImportResult<FeeTable> {
        let raw = raw.without_trailing_blank_rows();
        if raw.len() < METADATA_ROWS {
            return Err(ImportError::EmptyFeeTable(MISSING_METADATA_ROWS.to_string()));
        }

        let columns: Vec<FeeColumn> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(col, header)| FeeColumn {
                code: self.cleaner.clean_text(header, true),
                policy_label: raw.cell(0, col).unwrap_or("").to_string(),
                display_name: raw.cell(1, col).unwrap_or("").to_string(),
                fees: self.column_fees(&raw, col),
            })
            .collect();

        for c in &columns {
            debug!(code = %c.code, policy = %c.policy_label, years = c.len(), "费用列");
        }
        info!(columns = columns.len(), "费用表读取完成");

        Ok(FeeTable::new(columns))
    }

    /// 某列的费用序列；列尾空单元格不算年份（各国列长度不同）
    fn column_fees(&self, raw: &RawTable, col: usize) -> Vec<Option<f64>> {
        let mut fees: Vec<Option<f64>> = (METADATA_ROWS..raw.len())
            .map(|row| raw.cell(row, col).and_then(|v| self.cleaner.parse_fee(v)))
            .collect();
        while matches!(fees.last(), Some(None)) {
            fees.pop();
        }
        fees
    }
}
