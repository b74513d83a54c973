// ==========================================
// 专利年费计算引擎 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/配置各层错误，供外部调用方统一处理
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::export::error::ExportError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 输入表格读取/解析失败
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    /// 计算失败（整批无结果）
    #[error("年费计算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("结果写出失败: {0}")]
    Export(#[from] ExportError),
}

impl ApiError {
    /// 是否为费用表/专利数据本身的结构性问题（调用方应修正输入后重试）
    pub fn is_data_error(&self) -> bool {
        matches!(self, ApiError::Import(_) | ApiError::Engine(_))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
