// ==========================================
// 专利年费计算引擎 - 法域计算器
// ==========================================
// 按授权日锚定的各国计费规则，每国一个策略对象
// 新增法域: 在注册表中增加一条映射，不改分派逻辑
// ==========================================
// 共同约定:
// - 截止年为到期年（不含）
// - 费用序列下标越界/缺失一律按 0
// - 参考日期由调用方注入，不读系统时钟
// ==========================================

pub mod annual;
pub mod filing_indexed;
pub mod grant_lump_sum;

pub use annual::AnnualFlatCalculator;
pub use filing_indexed::FilingIndexedCalculator;
pub use grant_lump_sum::GrantLumpSumCalculator;

use crate::domain::fee_table::FeeColumn;
use crate::domain::patent::PatentRecord;
use crate::domain::schedule::FeeSchedule;
use crate::domain::types::CountryCode;
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

// ==========================================
// CalculationContext - 单件专利的计算输入
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CalculationContext<'a> {
    pub patent: &'a PatentRecord,
    pub fees: &'a FeeColumn,
    pub per_claim: Option<&'a FeeColumn>,
    pub today: NaiveDate,
}

impl<'a> CalculationContext<'a> {
    pub fn today_year(&self) -> i32 {
        self.today.year()
    }

    pub fn claims(&self) -> f64 {
        f64::from(self.patent.num_claims)
    }

    /// 按权利要求计费的单价（无伴随列时为 0）
    pub fn per_claim_fee(&self, index: i64) -> f64 {
        self.per_claim.map(|c| c.fee_at(index)).unwrap_or(0.0)
    }

    pub fn per_claim_sum_first(&self, n: i64) -> f64 {
        self.per_claim.map(|c| c.sum_first(n)).unwrap_or(0.0)
    }
}

// ==========================================
// IssuedDateCalculator Trait
// ==========================================
// 实现者: AnnualFlatCalculator, GrantLumpSumCalculator, FilingIndexedCalculator
pub trait IssuedDateCalculator: Send + Sync {
    /// 是否需要 <CODE>PC 伴随列
    fn requires_per_claim(&self) -> bool {
        false
    }

    /// 计算 (年份, 费用) 序列，年份严格递增
    fn calculate(&self, ctx: &CalculationContext<'_>) -> FeeSchedule;
}

// ==========================================
// JurisdictionRegistry - 国家代码 → 计算器
// ==========================================
#[derive(Default)]
pub struct JurisdictionRegistry {
    calculators: HashMap<String, Box<dyn IssuedDateCalculator>>,
}

impl JurisdictionRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 标准法域集合
    ///
    /// - US / TW / RU / MY: 逐年定额
    /// - JP / KR: 授权时一次缴前三年（含权利要求附加费）
    /// - ID: 授权时补缴申请至授权期间费用（含权利要求附加费），按申请年下标
    /// - SK: 同 ID，但不计权利要求附加费
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for code in ["US", "TW", "RU", "MY"] {
            registry.register(code, Box::new(AnnualFlatCalculator));
        }
        for code in ["JP", "KR"] {
            registry.register(code, Box::new(GrantLumpSumCalculator::default()));
        }
        registry.register("ID", Box::new(FilingIndexedCalculator::with_claims()));
        registry.register("SK", Box::new(FilingIndexedCalculator::flat_only()));
        registry
    }

    pub fn register(&mut self, code: &str, calculator: Box<dyn IssuedDateCalculator>) {
        self.calculators
            .insert(CountryCode::new(code).as_str().to_string(), calculator);
    }

    pub fn get(&self, code: &CountryCode) -> Option<&dyn IssuedDateCalculator> {
        self.calculators.get(code.as_str()).map(|c| c.as_ref())
    }

    pub fn supports(&self, code: &CountryCode) -> bool {
        self.calculators.contains_key(code.as_str())
    }

    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.calculators.keys().cloned().collect();
        codes.sort();
        codes
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn patent(country: &str, filing: NaiveDate, issued: NaiveDate, expiration: NaiveDate, claims: u32) -> PatentRecord {
        PatentRecord {
            patent_number: format!("{country}-TEST"),
            priority_date: None,
            filing_date: filing,
            issued_date: issued,
            expiration_date: expiration,
            country: CountryCode::new(country),
            num_claims: claims,
            row_number: 2,
        }
    }

    pub fn column(code: &str, fees: &[f64]) -> FeeColumn {
        FeeColumn {
            code: code.to_string(),
            policy_label: "issued date".to_string(),
            display_name: code.to_string(),
            fees: fees.iter().map(|f| Some(*f)).collect(),
        }
    }
}
