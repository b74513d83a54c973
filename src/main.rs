// ==========================================
// 专利年费计算引擎 - 命令行入口
// ==========================================
// 子命令:
//   calculate: 专利表 + 费用表 → 结果 CSV（可选概览 JSON）
//   countries: 列出费用表中的国家代码
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use patent_fee_calc::{logging, CalculationApi, CalculatorConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "patent-fee-calc")]
#[command(about = "Per-jurisdiction patent maintenance fee calculator")]
#[command(version)]
struct Cli {
    /// JSON 配置文件
    #[arg(short, long, global = true, env = "PATENT_FEE_CONFIG")]
    config: Option<PathBuf>,

    /// 以 JSON 行格式输出日志
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 计算年费并写出结果 CSV
    Calculate(CalculateArgs),
    /// 列出费用表中的国家代码、名称与计费策略
    Countries(CountriesArgs),
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// 专利表 (.csv / .xlsx)
    patents: PathBuf,

    /// 费用表 (.csv / .xlsx)
    #[arg(long)]
    fees: Option<PathBuf>,

    /// 结果 CSV 输出路径
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 参考日期 (YYYY-MM-DD)，默认今天
    #[arg(long)]
    today: Option<NaiveDate>,

    /// 概览 JSON 输出路径
    #[arg(long)]
    overview: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// 费用表 (.csv / .xlsx)
    #[arg(long)]
    fees: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    info!("专利年费计算引擎 v{}", patent_fee_calc::VERSION);

    let config = load_config(cli.config.as_ref())?;
    let api = CalculationApi::default();

    match cli.command {
        Command::Calculate(args) => run_calculate(&api, config, args),
        Command::Countries(args) => run_countries(&api, config, args),
    }
}

/// 配置文件 → 环境变量覆写
fn load_config(path: Option<&PathBuf>) -> Result<CalculatorConfig> {
    let base = match path {
        Some(p) => CalculatorConfig::from_file(p)
            .with_context(|| format!("无法加载配置文件: {}", p.display()))?,
        None => CalculatorConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}

fn run_calculate(api: &CalculationApi, mut config: CalculatorConfig, args: CalculateArgs) -> Result<()> {
    // 命令行参数优先
    if let Some(fees) = args.fees {
        config.fee_table_path = fees;
    }
    if let Some(today) = args.today {
        config.reference_date = Some(today);
    }
    if let Some(output) = args.output {
        config.output_path = Some(output);
    }

    if config.output_path.is_none() {
        anyhow::bail!("未指定结果输出路径（--output 或 PATENT_FEE_OUTPUT_PATH）");
    }

    let report = api
        .calculate_with_config(&config, &args.patents)
        .with_context(|| format!("计算失败: {}", args.patents.display()))?;

    if let Some(path) = &args.overview {
        api.write_overview(&report, path)?;
    }

    for skipped in &report.outcome.skipped {
        println!(
            "skipped: {} ({}) policy=\"{}\"",
            skipped.patent_number, skipped.country, skipped.policy_label
        );
    }
    println!(
        "run {}: {} patents, {} countries, grand total {:.2}",
        report.outcome.run_id,
        report.outcome.results.len(),
        report.overview.country_count,
        report.grand_total()
    );

    Ok(())
}

fn run_countries(api: &CalculationApi, config: CalculatorConfig, args: CountriesArgs) -> Result<()> {
    let fees = args.fees.unwrap_or(config.fee_table_path);
    let catalog = api
        .country_catalog(&fees)
        .with_context(|| format!("无法读取费用表: {}", fees.display()))?;

    for entry in catalog {
        println!("{}\t{}\t{}", entry.code, entry.display_name, entry.policy_label);
    }
    Ok(())
}
