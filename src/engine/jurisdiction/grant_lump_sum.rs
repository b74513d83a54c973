// ==========================================
// 授权时一次缴纳前若干年 (JP / KR)
// ==========================================
// 授权年: 前 N 年定额之和 + 权利要求数 × 前 N 年单价之和
//         （无论授权年是否早于今年都记入授权年，由分派器按窗口截取）
// 授权年 +1 .. 授权年 +N-1: 记 0（已含在一次性缴费中）
// 授权年 +N 起: 定额[下标] + 权利要求数 × 单价[下标]，下标 = 年份 - 授权年
// ==========================================

use super::{CalculationContext, IssuedDateCalculator};
use crate::domain::schedule::FeeSchedule;

/// 默认一次缴纳年数
pub const DEFAULT_PREPAID_YEARS: i32 = 3;

pub struct GrantLumpSumCalculator {
    prepaid_years: i32,
}

impl Default for GrantLumpSumCalculator {
    fn default() -> Self {
        Self {
            prepaid_years: DEFAULT_PREPAID_YEARS,
        }
    }
}

impl IssuedDateCalculator for GrantLumpSumCalculator {
    fn requires_per_claim(&self) -> bool {
        true
    }

    fn calculate(&self, ctx: &CalculationContext<'_>) -> FeeSchedule {
        let issued_year = ctx.patent.issued_year();
        let start_year = ctx.today_year().max(issued_year);
        let end_year = ctx.patent.expiration_year();
        let claims = ctx.claims();
        let prepaid = i64::from(self.prepaid_years);

        let mut schedule = FeeSchedule::new();

        let lump_sum = ctx.fees.sum_first(prepaid) + claims * ctx.per_claim_sum_first(prepaid);
        schedule.push(issued_year, lump_sum);

        for year in start_year..end_year {
            if year == issued_year {
                continue;
            }
            if year < issued_year + self.prepaid_years {
                schedule.push(year, 0.0);
                continue;
            }
            let index = i64::from(year - issued_year);
            schedule.push(year, ctx.fees.fee_at(index) + claims * ctx.per_claim_fee(index));
        }

        schedule
    }
}
