// ==========================================
// 专利年费计算引擎 - 引擎层错误类型
// ==========================================
// 结构性错误: 整批失败，不提交部分结果
// 数值缺口（越界/空值）不在此列，按 0 就地恢复
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 费用表无该国家列
    #[error("费用表中未找到国家代码: {country} (专利 {patent_number})")]
    UnknownCountryCode {
        country: String,
        patent_number: String,
    },

    /// 缺少按权利要求计费的伴随列（如 JP 缺 JPPC）
    #[error("费用表缺少伴随列 {column}: 国家 {country} (专利 {patent_number})")]
    MissingCompanionColumn {
        country: String,
        column: String,
        patent_number: String,
    },

    /// 按申请日计费时费用序列长度不足
    #[error("费用数据不足: 国家 {country} 需要 {required} 年，仅有 {available} 年 (专利 {patent_number})")]
    InsufficientFeeData {
        country: String,
        patent_number: String,
        required: usize,
        available: usize,
    },

    /// 按授权日计费但未注册该法域的计算器
    #[error("不支持按授权日计费的国家代码: {country} (专利 {patent_number})")]
    UnsupportedJurisdiction {
        country: String,
        patent_number: String,
    },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
