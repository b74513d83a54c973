// ==========================================
// 专利年费计算引擎 - 领域类型定义
// ==========================================
// 职责: 国家/法域代码、日期锚定策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 国家代码 (Country Code)
// ==========================================
// 规范化: TRIM + UPPER，与费用表列名一致
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// 按费用表列名规则规范化国家代码
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 对应的按权利要求计费伴随列名（如 JP → JPPC）
    pub fn per_claim_column(&self) -> String {
        format!("{}{}", self.0, PER_CLAIM_SUFFIX)
    }

    /// 是否为伴随列（以 PC 结尾且去掉后缀后仍非空）
    pub fn is_per_claim_column(name: &str) -> bool {
        let name = name.trim();
        name.len() > PER_CLAIM_SUFFIX.len() && name.ends_with(PER_CLAIM_SUFFIX)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountryCode {
    fn from(raw: &str) -> Self {
        CountryCode::new(raw)
    }
}

/// 伴随列后缀
pub const PER_CLAIM_SUFFIX: &str = "PC";

// ==========================================
// 日期锚定策略 (Date Type)
// ==========================================
// 来源: 费用表第 0 行
// 未识别的标签保留原文，由编排器跳过并上报
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    FilingDate,            // 按申请日锚定
    IssuedDate,            // 按授权/公告日锚定
    Unrecognized(String),  // 无法识别
}

impl DateType {
    /// 解析费用表中的策略标签（大小写不敏感）
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "filing date" => DateType::FilingDate,
            "issued date" => DateType::IssuedDate,
            _ => DateType::Unrecognized(label.trim().to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DateType::Unrecognized(_))
    }
}

impl fmt::Display for DateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateType::FilingDate => write!(f, "filing date"),
            DateType::IssuedDate => write!(f, "issued date"),
            DateType::Unrecognized(label) => write!(f, "{}", label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_normalized() {
        assert_eq!(CountryCode::new(" jp ").as_str(), "JP");
        assert_eq!(CountryCode::new("kr").per_claim_column(), "KRPC");
    }

    #[test]
    fn test_per_claim_column_detection() {
        assert!(CountryCode::is_per_claim_column("JPPC"));
        assert!(!CountryCode::is_per_claim_column("PC"));
        assert!(!CountryCode::is_per_claim_column("US"));
    }

    #[test]
    fn test_date_type_parse_case_insensitive() {
        assert_eq!(DateType::parse("Issued Date"), DateType::IssuedDate);
        assert_eq!(DateType::parse(" filing date "), DateType::FilingDate);
        assert_eq!(
            DateType::parse("grant date"),
            DateType::Unrecognized("grant date".to_string())
        );
        assert!(!DateType::parse("").is_recognized());
    }
}
