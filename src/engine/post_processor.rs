// ==========================================
// 专利年费计算引擎 - 结果后处理
// ==========================================
// 1. 当年费用抑制: 锚定日的 (月, 日) 晚于今天的 (月, 日) 时，
//    当年缴费窗口尚未开启，清除当年单元格
//    锚定日: 按授权日计费取授权日，否则取申请日
// 2. 合计: 每行合计 = 非空年份单元格之和；总计 = 各行合计之和
// ==========================================

use crate::domain::results::ResultsTable;
use crate::domain::types::DateType;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

pub struct SchedulePostProcessor;

impl SchedulePostProcessor {
    /// 依次执行当年抑制与合计
    pub fn process(&self, table: &mut ResultsTable, today: NaiveDate) {
        let cleared = self.suppress_current_year(table, today);
        self.add_totals(table);
        info!(
            cleared,
            grand_total = table.grand_total().unwrap_or(0.0),
            "后处理完成"
        );
    }

    /// 当年缴费窗口是否尚未开启（锚定日月日严格晚于今天）
    pub fn anniversary_pending(anchor: NaiveDate, today: NaiveDate) -> bool {
        (anchor.month(), anchor.day()) > (today.month(), today.day())
    }

    /// 清除尚未到期的当年费用，返回清除的单元格数
    pub fn suppress_current_year(&self, table: &mut ResultsTable, today: NaiveDate) -> usize {
        let current_year = today.year();

        let pending: Vec<usize> = table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let anchor = match row.date_type.as_ref()? {
                    DateType::IssuedDate => row.patent.issued_date,
                    DateType::FilingDate => row.patent.filing_date,
                    DateType::Unrecognized(_) => return None,
                };
                Self::anniversary_pending(anchor, today).then_some(idx)
            })
            .collect();

        let mut cleared = 0;
        for idx in pending {
            if table.clear_cell(idx, current_year) {
                debug!(
                    patent_number = %table.rows()[idx].patent.patent_number,
                    year = current_year,
                    "清除当年费用"
                );
                cleared += 1;
            }
        }
        cleared
    }

    /// 计算每行合计与总计
    pub fn add_totals(&self, table: &mut ResultsTable) {
        let totals: Vec<f64> = table
            .rows()
            .iter()
            .map(|row| row.fees.values().sum())
            .collect();

        for (idx, total) in totals.iter().enumerate() {
            table.set_total(idx, *total);
        }
        table.set_grand_total(totals.iter().sum());
    }
}
