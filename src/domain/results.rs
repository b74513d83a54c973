// ==========================================
// 专利年费计算引擎 - 结果表
// ==========================================
// 每件专利一行；年份列保存当年应缴费用（清除后为空）
// 状态流转: 编排器填充 → 后处理清除当年 → 汇总合计
// ==========================================

use crate::domain::patent::PatentRecord;
use crate::domain::schedule::FeeSchedule;
use crate::domain::types::DateType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 结果行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub patent: PatentRecord,
    pub date_type: Option<DateType>,
    pub fees: BTreeMap<i32, f64>,
    pub total_fees: Option<f64>,
}

impl ResultRow {
    pub fn new(patent: PatentRecord) -> Self {
        Self {
            patent,
            date_type: None,
            fees: BTreeMap::new(),
            total_fees: None,
        }
    }

    pub fn fee_for(&self, year: i32) -> Option<f64> {
        self.fees.get(&year).copied()
    }
}

/// 因策略无法识别而跳过的专利
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPatent {
    pub patent_number: String,
    pub country: String,
    pub policy_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    rows: Vec<ResultRow>,
    year_columns: BTreeSet<i32>,
    grand_total: Option<f64>,
}

impl ResultsTable {
    /// 按输入顺序为每件专利建一行
    pub fn from_patents(patents: &[PatentRecord]) -> Self {
        Self {
            rows: patents.iter().cloned().map(ResultRow::new).collect(),
            year_columns: BTreeSet::new(),
            grand_total: None,
        }
    }

    /// 把年费计划写入指定行（同时登记年份列）
    pub fn fill_schedule(&mut self, row_idx: usize, date_type: DateType, schedule: FeeSchedule) {
        let Some(row) = self.rows.get_mut(row_idx) else {
            return;
        };
        for entry in schedule {
            row.fees.insert(entry.year, entry.fee);
            self.year_columns.insert(entry.year);
        }
        row.date_type = Some(date_type);
    }

    /// 清除某行某年的费用；列本身保留
    pub fn clear_cell(&mut self, row_idx: usize, year: i32) -> bool {
        self.rows
            .get_mut(row_idx)
            .map(|row| row.fees.remove(&year).is_some())
            .unwrap_or(false)
    }

    pub fn set_total(&mut self, row_idx: usize, total: f64) {
        if let Some(row) = self.rows.get_mut(row_idx) {
            row.total_fees = Some(total);
        }
    }

    pub fn set_grand_total(&mut self, total: f64) {
        self.grand_total = Some(total);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn year_columns(&self) -> Vec<i32> {
        self.year_columns.iter().copied().collect()
    }

    pub fn grand_total(&self) -> Option<f64> {
        self.grand_total
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
