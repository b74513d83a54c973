// ==========================================
// 专利年费计算引擎 - 概览 JSON 写出
// ==========================================

use crate::engine::overview::FeeOverview;
use crate::export::error::{ExportError, ExportResult};
use std::io::Write;
use std::path::Path;

pub struct OverviewJsonWriter;

impl OverviewJsonWriter {
    pub fn write_file<P: AsRef<Path>>(&self, overview: &FeeOverview, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| ExportError::CreateFileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.write(overview, file)
    }

    pub fn write<W: Write>(&self, overview: &FeeOverview, mut out: W) -> ExportResult<()> {
        serde_json::to_writer_pretty(&mut out, overview)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_year_keys_written_as_strings() {
        let overview = FeeOverview {
            country_count: 1,
            total_by_country: BTreeMap::from([("US".to_string(), 10.0)]),
            total_by_year: BTreeMap::from([(2025, 10.0)]),
            grand_total: 10.0,
        };

        let mut buf = Vec::new();
        OverviewJsonWriter.write(&overview, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["total_by_year"]["2025"], 10.0);
        assert_eq!(value["grand_total"], 10.0);
    }
}
