// ==========================================
// 年费计算 集成测试
// ==========================================
// 测试目标: 文件输入 → 编排器 → 后处理 → 结果 CSV 的完整流程
// ==========================================


use patent_fee_calc::engine::EngineError;
use patent_fee_calc::{logging, ApiError, CalculationApi, DateType};
use test_helpers::{standard_fee_table, write_patents, ymd, PatentRow};

fn api() -> CalculationApi {
    logging::init_test();
    CalculationApi::default()
}

#[test]
fn test_jp_lump_sum_grace_then_annual() {
    let patents = write_patents(&[PatentRow::new("JP-1", "JP", "2012-01-10", "2015-06-01", "2035-06-01", 3)]).unwrap();
    let fees = standard_fee_table().write().unwrap();

    let report = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2015, 7, 1))
        .unwrap();
    let row = &report.outcome.results.rows()[0];

    // 100*3 + 3*(5*3)
    assert_eq!(row.fee_for(2015), Some(345.0));
    assert_eq!(row.fee_for(2016), Some(0.0));
    assert_eq!(row.fee_for(2017), Some(0.0));
    // 200 + 3*10
    assert_eq!(row.fee_for(2018), Some(230.0));
    assert_eq!(row.fee_for(2020), Some(230.0));
    // 超出费用序列
    assert_eq!(row.fee_for(2021), Some(0.0));
    assert_eq!(row.fee_for(2034), Some(0.0));
    assert_eq!(row.fee_for(2035), None);
    assert_eq!(row.total_fees, Some(345.0 + 230.0 * 3.0));
}

#[test]
fn test_current_year_suppressed_until_anniversary() {
    let patents = write_patents(&[
        PatentRow::new("US-LATE", "US", "2019-01-01", "2021-08-01", "2038-08-01", 0),
        PatentRow::new("US-EARLY", "US", "2019-01-01", "2021-03-01", "2038-03-01", 0),
    ])
    .unwrap();
    let fees = standard_fee_table().write().unwrap();

    let report = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();
    let results = &report.outcome.results;

    let late = &results.rows()[0];
    assert_eq!(late.date_type, Some(DateType::IssuedDate));
    assert_eq!(late.fee_for(2024), None);
    assert_eq!(late.total_fees, Some(3600.0 + 7400.0));

    let early = &results.rows()[1];
    assert_eq!(early.fee_for(2024), Some(1600.0));
    assert_eq!(early.total_fees, Some(1600.0 + 3600.0 + 7400.0));

    // 清除单元格后年份列仍保留
    assert!(results.year_columns().contains(&2024));
}

#[test]
fn test_filing_date_uses_tail_of_sequence() {
    let patents = write_patents(&[PatentRow::new("EP-1", "EP", "2020-03-01", "2023-05-01", "2030-03-01", 12)]).unwrap();
    let fees = standard_fee_table().write().unwrap();

    let report = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();
    let row = &report.outcome.results.rows()[0];

    assert_eq!(row.date_type, Some(DateType::FilingDate));
    assert_eq!(row.fee_for(2024), Some(500.0));
    assert_eq!(row.fee_for(2029), Some(1000.0));
    assert_eq!(row.fee_for(2030), None);
    assert_eq!(row.total_fees, Some(4500.0));
}

#[test]
fn test_insufficient_filing_data_fails_without_partial_result() {
    let patents = write_patents(&[
        PatentRow::new("US-1", "US", "2019-01-01", "2021-03-01", "2038-03-01", 0),
        PatentRow::new("EP-LONG", "EP", "2020-03-01", "2023-05-01", "2040-03-01", 0),
    ])
    .unwrap();
    let fees = standard_fee_table().write().unwrap();

    let err = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap_err();

    match err {
        ApiError::Engine(EngineError::InsufficientFeeData {
            patent_number,
            required,
            available,
            ..
        }) => {
            assert_eq!(patent_number, "EP-LONG");
            assert_eq!(required, 16);
            assert_eq!(available, 8);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_country_fails_batch() {
    let patents = write_patents(&[PatentRow::new("FR-1", "FR", "2019-01-01", "2021-03-01", "2038-03-01", 0)]).unwrap();
    let fees = standard_fee_table().write().unwrap();

    let err = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Engine(EngineError::UnknownCountryCode { ref country, .. }) if country == "FR"
    ));
}

#[test]
fn test_unrecognized_policy_skipped_and_reported() {
    let patents = write_patents(&[
        PatentRow::new("US-1", "US", "2019-01-01", "2021-03-01", "2038-03-01", 0),
        PatentRow::new("XX-1", "XX", "2019-01-01", "2021-03-01", "2038-03-01", 0),
    ])
    .unwrap();
    let fees = standard_fee_table()
        .column("XX", "priority date", "Nowhere", &[1.0; 20])
        .write()
        .unwrap();

    let report = api()
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();

    assert_eq!(report.outcome.skipped.len(), 1);
    assert_eq!(report.outcome.skipped[0].patent_number, "XX-1");
    assert_eq!(report.outcome.skipped[0].policy_label, "priority date");

    let skipped_row = &report.outcome.results.rows()[1];
    assert!(skipped_row.fees.is_empty());
    assert_eq!(skipped_row.total_fees, Some(0.0));
    assert_eq!(report.grand_total(), 1600.0 + 3600.0 + 7400.0);
}

#[test]
fn test_years_within_window_and_totals_consistent() {
    let today = ymd(2024, 6, 15);
    let patents = write_patents(&[
        PatentRow::new("US-1", "US", "2019-01-01", "2021-03-01", "2038-03-01", 0),
        PatentRow::new("US-2", "US", "2010-01-01", "2012-11-20", "2030-01-01", 0),
        PatentRow::new("JP-1", "JP", "2012-01-10", "2015-06-01", "2035-06-01", 3),
        PatentRow::new("EP-1", "EP", "2020-03-01", "2023-05-01", "2030-03-01", 0),
    ])
    .unwrap();
    let fees = standard_fee_table().write().unwrap();

    let report = api()
        .calculate_from_files(patents.path(), fees.path(), today)
        .unwrap();
    let results = &report.outcome.results;

    let mut sum_of_rows = 0.0;
    for row in results.rows() {
        let years: Vec<i32> = row.fees.keys().copied().collect();
        assert!(years.windows(2).all(|w| w[0] < w[1]));
        assert!(years.iter().all(|y| *y >= 2024 && *y < row.patent.expiration_year()));

        let total = row.total_fees.unwrap();
        assert!((total - row.fees.values().sum::<f64>()).abs() < 1e-9);
        sum_of_rows += total;
    }

    let grand_total = results.grand_total().unwrap();
    assert!((grand_total - sum_of_rows).abs() < 1e-9);
    assert!((report.overview.grand_total - grand_total).abs() < 1e-9);
}

#[test]
fn test_rerun_is_idempotent() {
    let patents = write_patents(&[
        PatentRow::new("US-1", "US", "2019-01-01", "2021-08-01", "2038-08-01", 0),
        PatentRow::new("JP-1", "JP", "2012-01-10", "2015-06-01", "2035-06-01", 3),
    ])
    .unwrap();
    let fees = standard_fee_table().write().unwrap();
    let api = api();

    let first = api
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();
    let second = api
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();

    assert_ne!(first.outcome.run_id, second.outcome.run_id);
    assert_eq!(first.outcome.results, second.outcome.results);
    assert_eq!(first.overview, second.overview);
}

#[test]
fn test_results_csv_written_with_grand_total() {
    let patents = write_patents(&[PatentRow::new("US-1", "US", "2019-01-01", "2021-03-01", "2026-03-01", 0)]).unwrap();
    let fees = standard_fee_table().write().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("results.csv");

    let api = api();
    let report = api
        .calculate_from_files(patents.path(), fees.path(), ymd(2024, 6, 15))
        .unwrap();
    api.write_results(&report, &out_path).unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Number of claims,2024,2025,Total Fees"));
    assert_eq!(lines[1], "US-1,US,,2019-01-01,2021-03-01,2026-03-01,0,1600.00,0.00,1600.00");
    assert_eq!(lines[2], "Grand Total,,,,,,,,,1600.00");
}
