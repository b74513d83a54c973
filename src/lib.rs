// ==========================================
// 专利年费计算引擎 - 核心库
// ==========================================
// 输入: 专利表 + 各国年费表 + 参考日期
// 输出: 每件专利逐年应缴年费的结果表（含合计）
// 红线: 计算为纯函数，参考日期由调用方注入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - 计费规则
pub mod engine;

// 导出层 - 结果表格
pub mod export;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 一站式接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CountryCode, DateType};

// 领域实体
pub use domain::{
    DateTypeMap, FeeColumn, FeeSchedule, FeeTable, PatentRecord, ResultRow, ResultsTable,
    SkippedPatent,
};

// 引擎
pub use engine::{
    CalculationOutcome, EngineError, FeeLocator, FeeOrchestrator, FeeOverview,
    FilingDateCalculator, JurisdictionRegistry, OverviewBuilder, SchedulePostProcessor,
};

// API
pub use api::{ApiError, ApiResult, CalculationApi, CalculationReport};

// 配置
pub use config::CalculatorConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "专利年费计算引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
