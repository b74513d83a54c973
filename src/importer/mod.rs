// ==========================================
// 专利年费计算引擎 - 导入层
// ==========================================
// 职责: 外部表格 → 领域对象
// 支持: Excel (.xlsx), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod fee_table_reader;
pub mod file_parser;
pub mod importer_trait;
pub mod patent_extractor;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use fee_table_reader::FeeTableReader;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::{FileParser, RawTable};
pub use patent_extractor::{columns, PatentRecordExtractor};
