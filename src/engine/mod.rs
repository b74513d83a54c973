// ==========================================
// 专利年费计算引擎 - 引擎层
// ==========================================
// 职责: 费用表定位、各法域计费、分派、后处理、汇总
// 红线: 纯计算，不读写文件；参考日期由调用方注入
// ==========================================

pub mod error;
pub mod fee_locator;
pub mod filing_date;
pub mod jurisdiction;
pub mod orchestrator;
pub mod overview;
pub mod post_processor;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use fee_locator::{FeeLocator, ResolvedFees};
pub use filing_date::FilingDateCalculator;
pub use jurisdiction::{
    AnnualFlatCalculator, CalculationContext, FilingIndexedCalculator, GrantLumpSumCalculator,
    IssuedDateCalculator, JurisdictionRegistry,
};
pub use orchestrator::{CalculationOutcome, FeeOrchestrator};
pub use overview::{FeeOverview, OverviewBuilder};
pub use post_processor::SchedulePostProcessor;
