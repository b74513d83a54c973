// ==========================================
// 逐年定额计费 (US / TW / RU / MY)
// ==========================================
// 起算: max(今年, 授权年)
// 下标: 年份 - 授权年
// 无一次性缴费，无宽限期
// ==========================================

use super::{CalculationContext, IssuedDateCalculator};
use crate::domain::schedule::FeeSchedule;

pub struct AnnualFlatCalculator;

impl IssuedDateCalculator for AnnualFlatCalculator {
    fn calculate(&self, ctx: &CalculationContext<'_>) -> FeeSchedule {
        let issued_year = ctx.patent.issued_year();
        let start_year = ctx.today_year().max(issued_year);
        let end_year = ctx.patent.expiration_year();

        let mut schedule = FeeSchedule::new();
        for year in start_year..end_year {
            let index = i64::from(year - issued_year);
            schedule.push(year, ctx.fees.fee_at(index));
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{column, patent, ymd};
    use super::*;

    #[test]
    fn test_us_indexed_from_issue_year() {
        let p = patent("US", ymd(2010, 1, 1), ymd(2012, 8, 1), ymd(2020, 1, 1), 10);
        let fees = column("US", &[0.0, 0.0, 0.0, 1600.0, 0.0, 0.0, 0.0, 3600.0]);
        let ctx = CalculationContext {
            patent: &p,
            fees: &fees,
            per_claim: None,
            today: ymd(2014, 3, 1),
        };

        let schedule = AnnualFlatCalculator.calculate(&ctx);
        assert_eq!(schedule.years(), (2014..2020).collect::<Vec<_>>());
        assert_eq!(schedule.fee_for(2015), Some(1600.0));
        assert_eq!(schedule.fee_for(2019), Some(3600.0));
    }

    #[test]
    fn test_index_beyond_sequence_is_zero() {
        let p = patent("TW", ymd(2010, 1, 1), ymd(2011, 1, 1), ymd(2016, 1, 1), 0);
        let fees = column("TW", &[10.0, 20.0]);
        let ctx = CalculationContext {
            patent: &p,
            fees: &fees,
            per_claim: None,
            today: ymd(2011, 6, 1),
        };

        let schedule = AnnualFlatCalculator.calculate(&ctx);
        let fees: Vec<f64> = schedule.entries().iter().map(|e| e.fee).collect();
        assert_eq!(fees, vec![10.0, 20.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_expiration_year_not_billed() {
        let p = patent("RU", ymd(2010, 1, 1), ymd(2011, 1, 1), ymd(2024, 12, 31), 0);
        let fees = column("RU", &[1.0; 20]);
        let ctx = CalculationContext {
            patent: &p,
            fees: &fees,
            per_claim: None,
            today: ymd(2024, 1, 1),
        };
        assert!(AnnualFlatCalculator.calculate(&ctx).is_empty());
    }
}
