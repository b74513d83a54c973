// ==========================================
// 专利年费计算引擎 - 导入 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// RawTable - 原始表格
// ==========================================
// 表头与单元格均已 TRIM；每行长度与表头对齐（不足补空串）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// 取单元格（空串视为缺失）
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// 仅去掉末尾的完全空白行（中间空行保留，维持行号语义）
    pub fn without_trailing_blank_rows(mut self) -> Self {
        while self
            .rows
            .last()
            .map(|r| r.iter().all(|v| v.is_empty()))
            .unwrap_or(false)
        {
            self.rows.pop();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → RawTable
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格（首行为表头）
    ///
    /// # 返回
    /// - Ok(RawTable): 全部数据行（含空白行，由调用方决定是否过滤）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_rows_padded_to_header_width() {
        let t = RawTable::new(s(&["A", "B", "C"]), vec![s(&["1"])]);
        assert_eq!(t.rows[0].len(), 3);
        assert_eq!(t.cell(0, 0), Some("1"));
        assert_eq!(t.cell(0, 2), None);
    }

    #[test]
    fn test_only_trailing_blank_rows_trimmed() {
        let t = RawTable::new(
            s(&["A", "B"]),
            vec![s(&["1", "2"]), s(&["", ""]), s(&["3", ""]), s(&["", ""])],
        );
        let t = t.without_trailing_blank_rows();
        assert_eq!(t.len(), 3);
        // 中间空行保留
        assert_eq!(t.cell(1, 0), None);
    }
}
