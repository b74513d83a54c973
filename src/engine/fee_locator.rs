// ==========================================
// 专利年费计算引擎 - 费用表定位器
// ==========================================
// 职责:
//   1. 校验每件专利的国家代码在费用表中有对应列
//   2. 由列元数据（第 0 行）构建 专利号 → 日期锚定策略 映射
//   3. 为计算器解析定额列与伴随列
// 红线: 只读费用表，不修改共享数据
// ==========================================

use crate::domain::fee_table::{DateTypeMap, FeeColumn, FeeTable};
use crate::domain::patent::PatentRecord;
use crate::engine::error::{EngineError, EngineResult};
use tracing::{debug, warn};

/// 单件专利解析出的费用列
#[derive(Debug, Clone, Copy)]
pub struct ResolvedFees<'a> {
    pub fees: &'a FeeColumn,
    pub per_claim: Option<&'a FeeColumn>,
}

pub struct FeeLocator<'a> {
    table: &'a FeeTable,
}

impl<'a> FeeLocator<'a> {
    pub fn new(table: &'a FeeTable) -> Self {
        Self { table }
    }

    /// 国家代码 → 费用列；缺列时报 UnknownCountryCode
    pub fn country_column(&self, patent: &PatentRecord) -> EngineResult<&'a FeeColumn> {
        self.table
            .column(patent.country.as_str())
            .ok_or_else(|| EngineError::UnknownCountryCode {
                country: patent.country.to_string(),
                patent_number: patent.patent_number.clone(),
            })
    }

    /// 构建日期锚定策略映射
    ///
    /// 任一专利的国家代码不在费用表中即整批失败。
    pub fn locate_date_types(&self, patents: &[PatentRecord]) -> EngineResult<DateTypeMap> {
        let mut map = DateTypeMap::new();
        for patent in patents {
            let column = self.country_column(patent)?;
            debug!(
                patent_number = %patent.patent_number,
                country = %patent.country,
                country_name = %column.display_name,
                date_type = %column.policy_label,
                "定位国家费用列"
            );
            let policy = column.policy();
            if let Some(previous) = map.insert(&patent.patent_number, policy.clone()) {
                if previous != policy {
                    warn!(
                        patent_number = %patent.patent_number,
                        country = %patent.country,
                        previous = %previous,
                        current = %policy,
                        "同一专利号对应不同的日期锚定策略，按各行国家分别计算"
                    );
                }
            }
        }
        Ok(map)
    }

    /// 解析计算所需的费用列
    ///
    /// # 参数
    /// - requires_per_claim: 该法域是否必须有 <CODE>PC 伴随列
    pub fn resolve(
        &self,
        patent: &PatentRecord,
        requires_per_claim: bool,
    ) -> EngineResult<ResolvedFees<'a>> {
        let fees = self.country_column(patent)?;

        let companion = patent.country.per_claim_column();
        let per_claim = self.table.column(&companion);
        if requires_per_claim && per_claim.is_none() {
            return Err(EngineError::MissingCompanionColumn {
                country: patent.country.to_string(),
                column: companion,
                patent_number: patent.patent_number.clone(),
            });
        }

        Ok(ResolvedFees { fees, per_claim })
    }
}
