// ==========================================
// 专利年费计算引擎 - 配置层
// ==========================================
// 职责: 费用表位置、参考日期、输出位置
// ==========================================

pub mod calculator_config;

// 重导出
pub use calculator_config::{
    default_fee_table_path, env_keys, CalculatorConfig, ConfigError, ConfigResult,
    DEFAULT_FEE_TABLE_FILE,
};
