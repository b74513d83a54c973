// ==========================================
// 专利年费计算引擎 - 导出层
// ==========================================
// 职责: 最终结果表 → CSV，概览 → JSON
// ==========================================

pub mod error;
pub mod overview_writer;
pub mod results_writer;

// 重导出核心类型
pub use error::{ExportError, ExportResult};
pub use overview_writer::OverviewJsonWriter;
pub use results_writer::{ResultsCsvWriter, GRAND_TOTAL_LABEL, TOTAL_FEES_COLUMN};
