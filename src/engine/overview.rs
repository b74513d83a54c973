// ==========================================
// 专利年费计算引擎 - 汇总概览
// ==========================================
// 由最终结果表汇总: 按国家合计、按年份合计
// ==========================================

use crate::domain::results::ResultsTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeeOverview {
    pub country_count: usize,
    pub total_by_country: BTreeMap<String, f64>,
    pub total_by_year: BTreeMap<i32, f64>,
    pub grand_total: f64,
}

pub struct OverviewBuilder;

impl OverviewBuilder {
    pub fn build(&self, table: &ResultsTable) -> FeeOverview {
        let mut total_by_country: BTreeMap<String, f64> = BTreeMap::new();
        let mut total_by_year: BTreeMap<i32, f64> =
            table.year_columns().into_iter().map(|y| (y, 0.0)).collect();

        for row in table.rows() {
            let row_total: f64 = row.total_fees.unwrap_or_else(|| row.fees.values().sum());
            *total_by_country
                .entry(row.patent.country.to_string())
                .or_insert(0.0) += row_total;

            for (year, fee) in &row.fees {
                *total_by_year.entry(*year).or_insert(0.0) += fee;
            }
        }

        FeeOverview {
            country_count: total_by_country.len(),
            grand_total: total_by_country.values().sum(),
            total_by_country,
            total_by_year,
        }
    }
}
