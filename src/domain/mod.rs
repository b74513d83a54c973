// ==========================================
// 专利年费计算引擎 - 领域模型层
// ==========================================
// 职责: 定义专利记录、费用表、年费计划、结果表
// 红线: 不含文件读写，不含计算逻辑
// ==========================================

pub mod fee_table;
pub mod patent;
pub mod results;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use fee_table::{
    missing_fee_as_zero, CountryCatalogEntry, DateTypeMap, FeeColumn, FeeTable, METADATA_ROWS,
};
pub use patent::PatentRecord;
pub use results::{ResultRow, ResultsTable, SkippedPatent};
pub use schedule::{FeeSchedule, YearFee};
pub use types::{CountryCode, DateType, PER_CLAIM_SUFFIX};
