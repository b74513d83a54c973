// ==========================================
// 专利年费计算引擎 - 年费计划
// ==========================================
// 单件专利的 (年份, 费用) 序列，年份严格递增
// ==========================================

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 单年应缴费用
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearFee {
    pub year: i32,
    pub fee: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    entries: Vec<YearFee>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一年；年份不大于上一条时忽略（保持严格递增）
    pub fn push(&mut self, year: i32, fee: f64) {
        if let Some(last) = self.entries.last() {
            if year <= last.year {
                tracing::debug!(year, last_year = last.year, "忽略非递增年份");
                return;
            }
        }
        self.entries.push(YearFee { year, fee });
    }

    /// 仅保留落在计费窗口 [start, end) 内的年份
    pub fn within(self, window: Range<i32>) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .filter(|e| window.contains(&e.year))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[YearFee] {
        &self.entries
    }

    pub fn years(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.year).collect()
    }

    pub fn fee_for(&self, year: i32) -> Option<f64> {
        self.entries.iter().find(|e| e.year == year).map(|e| e.fee)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.fee).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for FeeSchedule {
    type Item = YearFee;
    type IntoIter = std::vec::IntoIter<YearFee>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
