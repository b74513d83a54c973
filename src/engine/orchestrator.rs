// ==========================================
// 专利年费计算引擎 - 计算编排器
// ==========================================
// 主流程:
//   1. 费用表定位: 校验国家列 + 构建日期锚定策略映射
//   2. 计划: 按策略选择计算器并解析费用列（结构性错误在此整批失败）
//   3. 计算: 各专利年费计划（按申请日计费的数据不足同样整批失败）
//   4. 填表: 仅写入 [今年, 到期年) 范围内的年份
//   5. 后处理: 当年抑制 + 合计
// 策略无法识别的专利跳过并上报，不报错
// ==========================================

use crate::domain::fee_table::FeeTable;
use crate::domain::patent::PatentRecord;
use crate::domain::results::{ResultsTable, SkippedPatent};
use crate::domain::schedule::FeeSchedule;
use crate::domain::types::DateType;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::fee_locator::{FeeLocator, ResolvedFees};
use crate::engine::filing_date::FilingDateCalculator;
use crate::engine::jurisdiction::{CalculationContext, IssuedDateCalculator, JurisdictionRegistry};
use crate::engine::post_processor::SchedulePostProcessor;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ==========================================
// CalculationOutcome - 一次计算的结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct CalculationOutcome {
    pub run_id: Uuid,
    pub reference_date: NaiveDate,
    pub results: ResultsTable,
    pub skipped: Vec<SkippedPatent>,
}

/// 单件专利的计算计划
enum PlannedPatent<'a> {
    Issued {
        calculator: &'a dyn IssuedDateCalculator,
        resolved: ResolvedFees<'a>,
    },
    Filing {
        resolved: ResolvedFees<'a>,
    },
    Skip {
        policy_label: String,
    },
}

// ==========================================
// FeeOrchestrator - 计算编排器
// ==========================================
pub struct FeeOrchestrator {
    registry: JurisdictionRegistry,
    filing: FilingDateCalculator,
    post: SchedulePostProcessor,
}

impl Default for FeeOrchestrator {
    fn default() -> Self {
        Self::new(JurisdictionRegistry::standard())
    }
}

impl FeeOrchestrator {
    pub fn new(registry: JurisdictionRegistry) -> Self {
        Self {
            registry,
            filing: FilingDateCalculator,
            post: SchedulePostProcessor,
        }
    }

    pub fn registry(&self) -> &JurisdictionRegistry {
        &self.registry
    }

    /// 执行完整计算流程
    ///
    /// # 参数
    /// - patents: 专利记录（保持输入顺序）
    /// - fee_table: 费用表（只读）
    /// - today: 参考日期
    ///
    /// # 返回
    /// - Ok(CalculationOutcome): 已后处理的结果表 + 被跳过的专利
    /// - Err(EngineError): 结构性数据缺失，整批无结果
    pub fn run(
        &self,
        patents: &[PatentRecord],
        fee_table: &FeeTable,
        today: NaiveDate,
    ) -> EngineResult<CalculationOutcome> {
        let run_id = Uuid::new_v4();
        let span = info_span!("fee_calculation", %run_id, %today);
        let _guard = span.enter();

        info!(patents = patents.len(), "开始计算年费");

        let (mut results, skipped) = self.fill(patents, fee_table, today)?;
        self.post.process(&mut results, today);

        info!(
            rows = results.len(),
            skipped = skipped.len(),
            years = results.year_columns().len(),
            "年费计算完成"
        );

        Ok(CalculationOutcome {
            run_id,
            reference_date: today,
            results,
            skipped,
        })
    }

    /// 计算并填表（不含后处理）
    pub fn fill(
        &self,
        patents: &[PatentRecord],
        fee_table: &FeeTable,
        today: NaiveDate,
    ) -> EngineResult<(ResultsTable, Vec<SkippedPatent>)> {
        let locator = FeeLocator::new(fee_table);

        // 步骤1: 日期锚定策略（同时校验所有国家代码）
        let date_types = locator.locate_date_types(patents)?;
        debug!(distinct_patents = date_types.len(), "日期锚定策略定位完成");

        // 步骤2: 计划（策略按行取自该行国家列，重复专利号互不影响）
        let plans = patents
            .iter()
            .map(|p| {
                let date_type = locator.country_column(p)?.policy();
                self.plan(&locator, p, &date_type)
            })
            .collect::<EngineResult<Vec<_>>>()?;

        // 步骤3: 计算（全部成功后才写表）
        let mut schedules = Vec::with_capacity(patents.len());
        let mut skipped = Vec::new();
        for (patent, plan) in patents.iter().zip(plans) {
            match plan {
                PlannedPatent::Issued {
                    calculator,
                    resolved,
                } => {
                    let ctx = CalculationContext {
                        patent,
                        fees: resolved.fees,
                        per_claim: resolved.per_claim,
                        today,
                    };
                    let schedule = Self::clamp(patent, calculator.calculate(&ctx), today);
                    schedules.push(Some((DateType::IssuedDate, schedule)));
                }
                PlannedPatent::Filing { resolved } => {
                    let schedule = self.filing.calculate(patent, resolved.fees, today)?;
                    schedules.push(Some((DateType::FilingDate, Self::clamp(patent, schedule, today))));
                }
                PlannedPatent::Skip { policy_label } => {
                    warn!(
                        patent_number = %patent.patent_number,
                        country = %patent.country,
                        policy = %policy_label,
                        "日期锚定策略无法识别，跳过该专利"
                    );
                    skipped.push(SkippedPatent {
                        patent_number: patent.patent_number.clone(),
                        country: patent.country.to_string(),
                        policy_label,
                    });
                    schedules.push(None);
                }
            }
        }

        // 步骤4: 填表
        let mut results = ResultsTable::from_patents(patents);
        for (idx, entry) in schedules.into_iter().enumerate() {
            if let Some((date_type, schedule)) = entry {
                debug!(
                    patent_number = %patents[idx].patent_number,
                    years = schedule.len(),
                    total = schedule.total(),
                    "写入年费计划"
                );
                results.fill_schedule(idx, date_type, schedule);
            }
        }

        Ok((results, skipped))
    }

    /// 单件专利的年费计划（已按 [今年, 到期年) 截取）
    ///
    /// 策略无法识别时返回 Ok(None)。
    pub fn schedule_for(
        &self,
        patent: &PatentRecord,
        fee_table: &FeeTable,
        today: NaiveDate,
    ) -> EngineResult<Option<FeeSchedule>> {
        let locator = FeeLocator::new(fee_table);
        let date_type = locator.country_column(patent)?.policy();

        match self.plan(&locator, patent, &date_type)? {
            PlannedPatent::Issued {
                calculator,
                resolved,
            } => {
                let ctx = CalculationContext {
                    patent,
                    fees: resolved.fees,
                    per_claim: resolved.per_claim,
                    today,
                };
                Ok(Some(Self::clamp(patent, calculator.calculate(&ctx), today)))
            }
            PlannedPatent::Filing { resolved } => {
                let schedule = self.filing.calculate(patent, resolved.fees, today)?;
                Ok(Some(Self::clamp(patent, schedule, today)))
            }
            PlannedPatent::Skip { .. } => Ok(None),
        }
    }

    fn plan<'a>(
        &'a self,
        locator: &FeeLocator<'a>,
        patent: &PatentRecord,
        date_type: &DateType,
    ) -> EngineResult<PlannedPatent<'a>> {
        match date_type {
            DateType::IssuedDate => {
                let calculator = self.registry.get(&patent.country).ok_or_else(|| {
                    EngineError::UnsupportedJurisdiction {
                        country: patent.country.to_string(),
                        patent_number: patent.patent_number.clone(),
                    }
                })?;
                let resolved = locator.resolve(patent, calculator.requires_per_claim())?;
                Ok(PlannedPatent::Issued {
                    calculator,
                    resolved,
                })
            }
            DateType::FilingDate => Ok(PlannedPatent::Filing {
                resolved: locator.resolve(patent, false)?,
            }),
            DateType::Unrecognized(label) => Ok(PlannedPatent::Skip {
                policy_label: label.clone(),
            }),
        }
    }

    /// 截取计费窗口 [今年, 到期年)
    fn clamp(patent: &PatentRecord, schedule: FeeSchedule, today: NaiveDate) -> FeeSchedule {
        schedule.within(today.year()..patent.expiration_year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee_table::FeeColumn;
    use crate::engine::jurisdiction::test_support::{patent, ymd};

    fn column(code: &str, policy: &str, fees: &[f64]) -> FeeColumn {
        FeeColumn {
            code: code.to_string(),
            policy_label: policy.to_string(),
            display_name: code.to_string(),
            fees: fees.iter().map(|f| Some(*f)).collect(),
        }
    }

    fn fee_table() -> FeeTable {
        FeeTable::new(vec![
            column("US", "issued date", &[0.0, 0.0, 0.0, 1600.0, 0.0, 0.0, 0.0, 3600.0]),
            column("EP", "filing date", &[10.0; 20]),
            column("XX", "priority date", &[1.0; 20]),
            column("BR", "issued date", &[1.0; 20]),
            column("JP", "issued date", &[100.0, 100.0, 100.0, 200.0]),
        ])
    }

    #[test]
    fn test_unrecognized_policy_skipped_and_reported() {
        let patents = vec![
            patent("US", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 0),
            patent("XX", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 0),
        ];
        let (results, skipped) = FeeOrchestrator::default()
            .fill(&patents, &fee_table(), ymd(2024, 1, 1))
            .unwrap();

        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].policy_label, "priority date");
        assert!(results.rows()[1].fees.is_empty());
        assert_eq!(results.rows()[1].date_type, None);
        assert_eq!(results.rows()[0].fee_for(2024), Some(1600.0));
    }

    #[test]
    fn test_unsupported_issued_jurisdiction_fails_batch() {
        let patents = vec![patent("BR", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 0)];
        let err = FeeOrchestrator::default()
            .run(&patents, &fee_table(), ymd(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedJurisdiction { .. }));
    }

    #[test]
    fn test_missing_jppc_fails_batch() {
        let patents = vec![
            patent("US", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 0),
            patent("JP", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 2),
        ];
        let err = FeeOrchestrator::default()
            .run(&patents, &fee_table(), ymd(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingCompanionColumn { .. }));
    }

    #[test]
    fn test_duplicate_number_uses_each_rows_policy() {
        let mut us = patent("US", ymd(2010, 1, 1), ymd(2021, 1, 1), ymd(2030, 1, 1), 0);
        let mut ep = patent("EP", ymd(2020, 1, 1), ymd(2022, 1, 1), ymd(2030, 1, 1), 0);
        us.patent_number = "DUP-1".to_string();
        ep.patent_number = "DUP-1".to_string();

        let (results, skipped) = FeeOrchestrator::default()
            .fill(&[us, ep], &fee_table(), ymd(2024, 1, 1))
            .unwrap();

        assert!(skipped.is_empty());
        assert_eq!(results.rows()[0].date_type, Some(DateType::IssuedDate));
        assert_eq!(results.rows()[0].fee_for(2024), Some(1600.0));
        assert_eq!(results.rows()[1].date_type, Some(DateType::FilingDate));
        assert_eq!(results.rows()[1].fee_for(2024), Some(10.0));
    }

    #[test]
    fn test_schedule_for_clamps_past_lump_sum() {
        let mut table = fee_table();
        table = FeeTable::new(
            table
                .columns()
                .iter()
                .cloned()
                .chain(std::iter::once(column("JPPC", "issued date", &[1.0; 4])))
                .collect(),
        );
        let p = patent("JP", ymd(2010, 1, 1), ymd(2015, 6, 1), ymd(2030, 1, 1), 2);

        let schedule = FeeOrchestrator::default()
            .schedule_for(&p, &table, ymd(2024, 1, 1))
            .unwrap()
            .unwrap();
        assert_eq!(schedule.years().first(), Some(&2024));
        assert_eq!(schedule.years().last(), Some(&2029));
    }
}
