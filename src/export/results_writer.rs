// ==========================================
// 专利年费计算引擎 - 结果 CSV 写出
// ==========================================
// 列: 7 个输入列 + 各年份列 + Total Fees
// 末尾追加一行 Grand Total
// 清除/缺失的单元格写空串
// ==========================================

use crate::domain::results::{ResultRow, ResultsTable};
use crate::export::error::{ExportError, ExportResult};
use crate::importer::patent_extractor::columns;
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

pub const TOTAL_FEES_COLUMN: &str = "Total Fees";
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

pub struct ResultsCsvWriter;

impl ResultsCsvWriter {
    pub fn write_file<P: AsRef<Path>>(&self, table: &ResultsTable, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| ExportError::CreateFileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.write(table, file)
    }

    pub fn write<W: Write>(&self, table: &ResultsTable, out: W) -> ExportResult<()> {
        let mut writer = WriterBuilder::new().from_writer(out);
        let years = table.year_columns();

        let mut header: Vec<String> = columns::REQUIRED.iter().map(|c| c.to_string()).collect();
        header.extend(years.iter().map(|y| y.to_string()));
        header.push(TOTAL_FEES_COLUMN.to_string());
        writer.write_record(&header)?;

        for row in table.rows() {
            writer.write_record(Self::row_record(row, &years))?;
        }

        // 总计行
        let mut total_row = vec![String::new(); header.len()];
        total_row[0] = GRAND_TOTAL_LABEL.to_string();
        if let Some(last) = total_row.last_mut() {
            *last = Self::money(table.grand_total());
        }
        writer.write_record(&total_row)?;

        writer.flush()?;
        Ok(())
    }

    fn row_record(row: &ResultRow, years: &[i32]) -> Vec<String> {
        let p = &row.patent;
        let mut record = vec![
            p.patent_number.clone(),
            p.country.to_string(),
            Self::date(p.priority_date),
            Self::date(Some(p.filing_date)),
            Self::date(Some(p.issued_date)),
            Self::date(Some(p.expiration_date)),
            p.num_claims.to_string(),
        ];
        record.extend(years.iter().map(|y| Self::money(row.fee_for(*y))));
        record.push(Self::money(row.total_fees));
        record
    }

    fn date(value: Option<NaiveDate>) -> String {
        value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }

    fn money(value: Option<f64>) -> String {
        value.map(|v| format!("{:.2}", v)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::FeeSchedule;
    use crate::domain::types::DateType;
    use crate::engine::jurisdiction::test_support::{patent, ymd};
    use crate::engine::SchedulePostProcessor;

    #[test]
    fn test_csv_layout_with_grand_total() {
        let a = patent("US", ymd(2020, 1, 1), ymd(2022, 1, 1), ymd(2030, 1, 1), 3);
        let b = patent("TW", ymd(2020, 1, 1), ymd(2022, 1, 1), ymd(2030, 1, 1), 0);
        let mut table = ResultsTable::from_patents(&[a, b]);
        let mut s = FeeSchedule::new();
        s.push(2025, 10.0);
        s.push(2026, 20.5);
        table.fill_schedule(0, DateType::IssuedDate, s);
        let mut s = FeeSchedule::new();
        s.push(2026, 4.0);
        table.fill_schedule(1, DateType::IssuedDate, s);
        SchedulePostProcessor.add_totals(&mut table);

        let mut buf = Vec::new();
        ResultsCsvWriter.write(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].ends_with("Number of claims,2025,2026,Total Fees"));
        assert_eq!(lines[1], "US-TEST,US,,2020-01-01,2022-01-01,2030-01-01,3,10.00,20.50,30.50");
        assert_eq!(lines[2], "TW-TEST,TW,,2020-01-01,2022-01-01,2030-01-01,0,,4.00,4.00");
        assert_eq!(lines[3], "Grand Total,,,,,,,,,34.50");
    }

    #[test]
    fn test_unwritable_path_reported_as_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.csv");

        let err = ResultsCsvWriter
            .write_file(&ResultsTable::default(), &path)
            .unwrap_err();
        match err {
            ExportError::CreateFileError { path: p, .. } => assert!(p.ends_with("results.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
