// ==========================================
// 专利年费计算引擎 - 按申请日计费
// ==========================================
// 适用: 费用表策略标签为 "filing date" 的任意国家
// 规则:
//   起算年 = max(今年, 申请年)
//   剩余年数 = 到期年 - 起算年
//   取费用序列末尾"剩余年数"项，依次对应起算年起的各年
//   序列长度不足 → InsufficientFeeData（不产生部分结果）
// ==========================================

use crate::domain::fee_table::FeeColumn;
use crate::domain::patent::PatentRecord;
use crate::domain::schedule::FeeSchedule;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate};

pub struct FilingDateCalculator;

impl FilingDateCalculator {
    pub fn calculate(
        &self,
        patent: &PatentRecord,
        fees: &FeeColumn,
        today: NaiveDate,
    ) -> EngineResult<FeeSchedule> {
        let start_year = today.year().max(patent.filing_year());
        let remaining = patent.expiration_year() - start_year;

        let mut schedule = FeeSchedule::new();
        if remaining <= 0 {
            return Ok(schedule);
        }

        let remaining = remaining as usize;
        let selected = fees.tail(remaining).ok_or_else(|| EngineError::InsufficientFeeData {
            country: patent.country.to_string(),
            patent_number: patent.patent_number.clone(),
            required: remaining,
            available: fees.len(),
        })?;

        for (offset, fee) in selected.into_iter().enumerate() {
            schedule.push(start_year + offset as i32, fee);
        }
        Ok(schedule)
    }
}
