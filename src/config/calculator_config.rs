// ==========================================
// 专利年费计算引擎 - 计算配置
// ==========================================
// 来源优先级: 环境变量 > 配置文件 (JSON) > 默认值
// ==========================================

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const FEE_TABLE_PATH: &str = "PATENT_FEE_TABLE_PATH";
    pub const REFERENCE_DATE: &str = "PATENT_FEE_REFERENCE_DATE";
    pub const OUTPUT_PATH: &str = "PATENT_FEE_OUTPUT_PATH";
}

/// 默认费用表文件名
pub const DEFAULT_FEE_TABLE_FILE: &str = "feesdollars.xlsx";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// 费用表路径（.xlsx / .csv）
    #[serde(default = "default_fee_table_path")]
    pub fee_table_path: PathBuf,

    /// 参考日期；为空时使用本地当天
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// 结果 CSV 输出路径
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            fee_table_path: default_fee_table_path(),
            reference_date: None,
            output_path: None,
        }
    }
}

/// 默认费用表路径
///
/// 用户数据目录下的 patent-fee-calc/feesdollars.xlsx；取不到数据目录时回退到当前目录。
pub fn default_fee_table_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("patent-fee-calc").join(DEFAULT_FEE_TABLE_FILE),
        None => PathBuf::from(".").join(DEFAULT_FEE_TABLE_FILE),
    }
}

impl CalculatorConfig {
    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 用环境变量覆写
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 用给定的键值来源覆写（空白值忽略）
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = get(env_keys::FEE_TABLE_PATH) {
            self.fee_table_path = PathBuf::from(path);
        }

        if let Some(value) = get(env_keys::REFERENCE_DATE) {
            let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| {
                ConfigError::ValueError {
                    key: env_keys::REFERENCE_DATE.to_string(),
                    value: value.clone(),
                    message: e.to_string(),
                }
            })?;
            self.reference_date = Some(date);
        }

        if let Some(path) = get(env_keys::OUTPUT_PATH) {
            self.output_path = Some(PathBuf::from(path));
        }

        Ok(self)
    }

    /// 计算使用的"今天"
    pub fn reference_date_or_today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
