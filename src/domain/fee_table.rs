// ==========================================
// 专利年费计算引擎 - 费用表
// ==========================================
// 结构: 宽表，每个国家代码一列
//   第 0 行: 日期锚定策略标签
//   第 1 行: 国家显示名称
//   第 2 行起: 按"距锚定年的年数"排列的费用序列
// 规则: 缺失费用（空值/非数值/越界）一律按 0 计
// ==========================================

use crate::domain::types::{CountryCode, DateType, PER_CLAIM_SUFFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 费用表中元数据占用的行数（策略标签 + 显示名称）
pub const METADATA_ROWS: usize = 2;

/// 缺失费用按 0 计
///
/// 费用序列中的空值、非数值以及越界下标都经由此规则取值。
pub fn missing_fee_as_zero(entry: Option<f64>) -> f64 {
    match entry {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// ==========================================
// FeeColumn - 单列费用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeColumn {
    pub code: String,
    pub policy_label: String,
    pub display_name: String,
    pub fees: Vec<Option<f64>>,
}

impl FeeColumn {
    pub fn policy(&self) -> DateType {
        DateType::parse(&self.policy_label)
    }

    pub fn len(&self) -> usize {
        self.fees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fees.is_empty()
    }

    /// 按下标取费用；负下标、越界与缺失值均为 0
    pub fn fee_at(&self, index: i64) -> f64 {
        if index < 0 {
            return 0.0;
        }
        missing_fee_as_zero(self.fees.get(index as usize).copied().flatten())
    }

    /// 前 n 项费用之和（n ≤ 0 时为 0）
    pub fn sum_first(&self, n: i64) -> f64 {
        (0..n.max(0)).map(|i| self.fee_at(i)).sum()
    }

    /// 序列末尾 n 项；序列长度不足时返回 None
    pub fn tail(&self, n: usize) -> Option<Vec<f64>> {
        if n > self.fees.len() {
            return None;
        }
        let start = self.fees.len() - n;
        Some(
            self.fees[start..]
                .iter()
                .map(|v| missing_fee_as_zero(*v))
                .collect(),
        )
    }
}

// ==========================================
// FeeTable - 整张费用表（每次计算加载一次，只读）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeTable {
    columns: Vec<FeeColumn>,
}

/// 国家目录条目（费用表主列的显示名称与策略）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCatalogEntry {
    pub code: String,
    pub display_name: String,
    pub policy_label: String,
}

impl FeeTable {
    pub fn new(columns: Vec<FeeColumn>) -> Self {
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&FeeColumn> {
        self.columns.iter().find(|c| c.code == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn columns(&self) -> &[FeeColumn] {
        &self.columns
    }

    /// 列出所有国家主列（不含 PC 伴随列）
    pub fn country_catalog(&self) -> Vec<CountryCatalogEntry> {
        self.columns
            .iter()
            .filter(|c| {
                let base = c.code.strip_suffix(PER_CLAIM_SUFFIX);
                !(CountryCode::is_per_claim_column(&c.code)
                    && base.map(|b| self.has_column(b)).unwrap_or(false))
            })
            .map(|c| CountryCatalogEntry {
                code: c.code.clone(),
                display_name: c.display_name.clone(),
                policy_label: c.policy_label.clone(),
            })
            .collect()
    }
}

// ==========================================
// DateTypeMap - 专利号 → 日期锚定策略
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateTypeMap {
    inner: HashMap<String, DateType>,
}

impl DateTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入映射；返回该专利号原有的策略
    pub fn insert(&mut self, patent_number: &str, date_type: DateType) -> Option<DateType> {
        self.inner.insert(patent_number.to_string(), date_type)
    }

    pub fn get(&self, patent_number: &str) -> Option<&DateType> {
        self.inner.get(patent_number)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
