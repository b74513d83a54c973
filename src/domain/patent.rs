// ==========================================
// 专利年费计算引擎 - 专利记录
// ==========================================
// 生命周期: 由提取器从原始行构造一次，之后只读
// ==========================================

use crate::domain::types::CountryCode;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 规范化后的专利记录（一行输入对应一条）
///
/// 不校验日期先后关系；日期不一致时计算结果可能无意义，但不会崩溃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatentRecord {
    pub patent_number: String,
    pub priority_date: Option<NaiveDate>,
    pub filing_date: NaiveDate,
    pub issued_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub country: CountryCode,
    pub num_claims: u32,

    // 元信息
    pub row_number: usize,
}

impl PatentRecord {
    pub fn filing_year(&self) -> i32 {
        self.filing_date.year()
    }

    pub fn issued_year(&self) -> i32 {
        self.issued_date.year()
    }

    /// 计费截止年（不含）
    pub fn expiration_year(&self) -> i32 {
        self.expiration_date.year()
    }
}
