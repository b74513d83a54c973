// ==========================================
// 授权时补缴 + 按申请年下标 (ID / SK)
// ==========================================
// 授权年: 补缴 (授权年 - 申请年) 年的费用
// 授权次年起逐年缴费，下标 = 年份 - 申请年（注意: 不是授权年）
// ID 计入权利要求附加费；SK 仅定额
// ==========================================

use super::{CalculationContext, IssuedDateCalculator};
use crate::domain::schedule::FeeSchedule;

pub struct FilingIndexedCalculator {
    include_claims: bool,
}

impl FilingIndexedCalculator {
    /// 定额 + 权利要求附加费（ID）
    pub fn with_claims() -> Self {
        Self {
            include_claims: true,
        }
    }

    /// 仅定额（SK）
    pub fn flat_only() -> Self {
        Self {
            include_claims: false,
        }
    }

    fn claims_component(&self, ctx: &CalculationContext<'_>, per_claim: f64) -> f64 {
        if self.include_claims {
            ctx.claims() * per_claim
        } else {
            0.0
        }
    }
}

impl IssuedDateCalculator for FilingIndexedCalculator {
    // SK 的费用表结构与 ID 相同，伴随列必须存在
    fn requires_per_claim(&self) -> bool {
        true
    }

    fn calculate(&self, ctx: &CalculationContext<'_>) -> FeeSchedule {
        let filing_year = ctx.patent.filing_year();
        let issued_year = ctx.patent.issued_year();
        let start_year = ctx.today_year().max(issued_year + 1);
        let end_year = ctx.patent.expiration_year();

        let mut schedule = FeeSchedule::new();

        let covered = i64::from(issued_year - filing_year);
        let lump_sum = ctx.fees.sum_first(covered)
            + self.claims_component(ctx, ctx.per_claim_sum_first(covered));
        schedule.push(issued_year, lump_sum);

        for year in start_year..end_year {
            let index = i64::from(year - filing_year);
            let fee = ctx.fees.fee_at(index) + self.claims_component(ctx, ctx.per_claim_fee(index));
            schedule.push(year, fee);
        }

        schedule
    }
}
