// ==========================================
// 专利年费计算引擎 - API 层
// ==========================================
// 职责: 为 CLI / 外部 Web 层提供一站式计算接口
// ==========================================

pub mod calculation_api;
pub mod error;

// 重导出核心类型
pub use calculation_api::{CalculationApi, CalculationReport};
pub use error::{ApiError, ApiResult};
