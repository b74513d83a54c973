// ==========================================
// 专利年费计算引擎 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 日期与数值解析
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Excel 序列日期的零点（1900 闰年缺陷已折算）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Excel 可表示的最大序列日期（9999-12-31）
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"];

pub struct DataCleaner;

impl DataCleaner {
    pub fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析日期
    ///
    /// 依次尝试: 纯日期格式 → 日期时间格式 → Excel 序列号
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();

        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
                return Some(d);
            }
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
                return Some(dt.date());
            }
        }

        self.parse_excel_serial(value)
    }

    fn parse_excel_serial(&self, value: &str) -> Option<NaiveDate> {
        let serial = value.parse::<f64>().ok()?;
        if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
            return None;
        }
        let (y, m, d) = EXCEL_EPOCH;
        NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.trunc() as i64))
    }

    /// 解析费用金额；空值/非数值为 None（由费用表规则按 0 计）
    pub fn parse_fee(&self, value: &str) -> Option<f64> {
        let cleaned: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | ' '))
            .collect();
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// 解析非负整数（兼容 Excel 的 "12.0"）
    pub fn parse_count(&self, value: &str) -> Option<u32> {
        let v = value.trim().parse::<f64>().ok()?;
        if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
            Some(v as u32)
        } else {
            None
        }
    }
}
