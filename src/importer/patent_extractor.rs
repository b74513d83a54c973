// ==========================================
// 专利年费计算引擎 - 专利记录提取器
// ==========================================
// 职责: 原始表格行 → PatentRecord（保持行序）
// 红线: 缺列时一次性列出全部缺失列，不只报第一个
// ==========================================

use crate::domain::patent::PatentRecord;
use crate::domain::types::CountryCode;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RawTable;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info, warn};

// ==========================================
// 标准列名
// ==========================================
pub mod columns {
    pub const PATENT_NUMBER: &str = "Patent/Publication Number";
    pub const COUNTRY: &str = "Publication Country";
    pub const PRIORITY_DATE: &str = "Priority Date";
    pub const FILE_DATE: &str = "File Date";
    pub const PUBLICATION_DATE: &str = "Publication Date";
    pub const EXPIRATION_DATE: &str = "Est. Expiration Date";
    pub const NUM_CLAIMS: &str = "Number of claims";

    /// 必需列（按输出顺序）
    pub const REQUIRED: [&str; 7] = [
        PATENT_NUMBER,
        COUNTRY,
        PRIORITY_DATE,
        FILE_DATE,
        PUBLICATION_DATE,
        EXPIRATION_DATE,
        NUM_CLAIMS,
    ];
}

/// 必需列在表中的位置
struct ColumnLayout {
    patent_number: usize,
    country: usize,
    priority_date: usize,
    file_date: usize,
    publication_date: usize,
    expiration_date: usize,
    num_claims: usize,
}

pub struct PatentRecordExtractor {
    cleaner: DataCleaner,
}

impl Default for PatentRecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatentRecordExtractor {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 提取专利记录
    ///
    /// # 返回
    /// - Ok(Vec<PatentRecord>): 每个非空行一条，顺序与输入一致
    /// - Err(MissingColumns): 列出全部缺失的必需列
    /// - Err(MissingValue / DateFormatError / TypeConversionError): 单元格无法解析
    ///
    /// 不校验日期先后关系。
    pub fn extract(&self, table: &RawTable) -> ImportResult<Vec<PatentRecord>> {
        let layout = self.resolve_layout(table)?;

        let mut records = Vec::with_capacity(table.len());
        let mut seen = HashSet::new();

        for (idx, row) in table.rows.iter().enumerate() {
            // 跳过完全空白的行
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            // 表头占第 1 行
            let row_number = idx + 2;
            let record = self.map_row(table, idx, row_number, &layout)?;

            if !seen.insert(record.patent_number.clone()) {
                warn!(
                    patent_number = %record.patent_number,
                    row = row_number,
                    "专利号重复"
                );
            }
            records.push(record);
        }

        info!(count = records.len(), "专利记录提取完成");
        Ok(records)
    }

    /// 查找列名（支持别名）
    fn find_column(&self, table: &RawTable, key: &str) -> Option<usize> {
        let aliases: &[&str] = match key {
            columns::PATENT_NUMBER => &[
                "Patent/Publication Number",
                "Patent/ Publication Number",
                "Patent / Publication Number",
            ],
            _ => &[],
        };

        table.column_index(key).or_else(|| {
            aliases
                .iter()
                .find_map(|alias| table.column_index(alias))
        })
    }

    fn resolve_layout(&self, table: &RawTable) -> ImportResult<ColumnLayout> {
        let found: Vec<Option<usize>> = columns::REQUIRED
            .iter()
            .map(|key| self.find_column(table, key))
            .collect();

        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .zip(found.iter())
            .filter(|(_, idx)| idx.is_none())
            .map(|(key, _)| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { columns: missing });
        }

        let idx: Vec<usize> = found.into_iter().flatten().collect();
        debug!(?idx, "必需列定位完成");

        Ok(ColumnLayout {
            patent_number: idx[0],
            country: idx[1],
            priority_date: idx[2],
            file_date: idx[3],
            publication_date: idx[4],
            expiration_date: idx[5],
            num_claims: idx[6],
        })
    }

    fn map_row(
        &self,
        table: &RawTable,
        idx: usize,
        row_number: usize,
        layout: &ColumnLayout,
    ) -> ImportResult<PatentRecord> {
        let patent_number = self.required_text(table, idx, layout.patent_number, columns::PATENT_NUMBER, row_number)?;
        let country = self.required_text(table, idx, layout.country, columns::COUNTRY, row_number)?;

        Ok(PatentRecord {
            patent_number,
            priority_date: self.optional_date(table, idx, layout.priority_date, columns::PRIORITY_DATE, row_number)?,
            filing_date: self.required_date(table, idx, layout.file_date, columns::FILE_DATE, row_number)?,
            issued_date: self.required_date(table, idx, layout.publication_date, columns::PUBLICATION_DATE, row_number)?,
            expiration_date: self.required_date(table, idx, layout.expiration_date, columns::EXPIRATION_DATE, row_number)?,
            country: CountryCode::new(&country),
            num_claims: self.claims(table, idx, layout.num_claims, row_number)?,
            row_number,
        })
    }

    fn text(&self, table: &RawTable, idx: usize, column: usize) -> Option<String> {
        self.cleaner.normalize_null(table.cell(idx, column))
    }

    fn required_text(
        &self,
        table: &RawTable,
        idx: usize,
        column: usize,
        field: &str,
        row_number: usize,
    ) -> ImportResult<String> {
        self.text(table, idx, column).ok_or_else(|| ImportError::MissingValue {
            row: row_number,
            field: field.to_string(),
        })
    }

    fn optional_date(
        &self,
        table: &RawTable,
        idx: usize,
        column: usize,
        field: &str,
        row_number: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        match self.text(table, idx, column) {
            None => Ok(None),
            Some(value) => self
                .cleaner
                .parse_date(&value)
                .map(Some)
                .ok_or(ImportError::DateFormatError {
                    row: row_number,
                    field: field.to_string(),
                    value,
                }),
        }
    }

    fn required_date(
        &self,
        table: &RawTable,
        idx: usize,
        column: usize,
        field: &str,
        row_number: usize,
    ) -> ImportResult<NaiveDate> {
        self.optional_date(table, idx, column, field, row_number)?
            .ok_or_else(|| ImportError::MissingValue {
                row: row_number,
                field: field.to_string(),
            })
    }

    /// 权利要求数；空值按 0
    fn claims(&self, table: &RawTable, idx: usize, column: usize, row_number: usize) -> ImportResult<u32> {
        match self.text(table, idx, column) {
            None => Ok(0),
            Some(value) => self
                .cleaner
                .parse_count(&value)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: row_number,
                    field: columns::NUM_CLAIMS.to_string(),
                    message: format!("无法解析为非负整数: {}", value),
                }),
        }
    }
}
