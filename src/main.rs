use analytics::PercentileRank;
use analyzer::{
    Analyzer, BatchFailure, BatchReport, CompanyInput, DealSummary, MetricsReport, SectorTables,
    ValuationReport,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use core_types::{CompanyRecord, GrowthClass, Metric, SectorParameters, SectorPercentileRow};
use predictability::{PredictabilityResult, PredictabilitySignals};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// The main entry point for the Incrolink valuation engine.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    // Held until exit so the file writer can flush.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let analyzer = Analyzer::new(&config)?;
    let output = if cli.json { Output::Json } else { Output::Table };

    // Execute the appropriate command
    match cli.command {
        Commands::Metrics(args) => handle_metrics(args, &analyzer, output),
        Commands::Value(args) => handle_value(args, analyzer, output),
        Commands::Predict(args) => handle_predict(args, &analyzer, output),
        Commands::Analyze(args) => handle_analyze(args, &analyzer, output),
        Commands::Batch(args) => handle_batch(args, &analyzer, output),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sector benchmarking, DCF valuation and predictability grading for
/// acquisition targets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `config.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a company's ratios and rank them within its sector.
    Metrics(MetricsArgs),
    /// Value a company with a discounted-cash-flow model.
    Value(ValueArgs),
    /// Grade predictability from a set of signals.
    Predict(PredictArgs),
    /// Run metrics, valuation and predictability for one company.
    Analyze(AnalyzeArgs),
    /// Value and classify a list of companies.
    Batch(BatchArgs),
}

#[derive(Parser)]
struct MetricsArgs {
    /// JSON file with the company record (and optional `statements`).
    #[arg(long)]
    company: PathBuf,

    /// JSON file with the sector percentile table.
    #[arg(long)]
    percentiles: PathBuf,
}

#[derive(Parser)]
struct ValueArgs {
    /// JSON file with the company record.
    #[arg(long)]
    company: PathBuf,

    /// JSON file with the sector parameter table.
    #[arg(long)]
    params: PathBuf,

    /// Projection horizon, overriding the configured one.
    #[arg(long)]
    years: Option<usize>,
}

#[derive(Parser)]
struct PredictArgs {
    /// JSON file with the predictability signals.
    #[arg(long)]
    signals: PathBuf,
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// JSON file with the company record, `ceo_age` and optional `statements`.
    #[arg(long)]
    company: PathBuf,

    #[arg(long)]
    params: PathBuf,

    #[arg(long)]
    percentiles: PathBuf,
}

#[derive(Parser)]
struct BatchArgs {
    /// JSON file with an array of company records.
    #[arg(long)]
    companies: PathBuf,

    #[arg(long)]
    params: PathBuf,

    /// Only list companies with this classification (e.g. "top-pick").
    #[arg(long)]
    class: Option<GrowthClass>,
}

#[derive(Clone, Copy)]
enum Output {
    Table,
    Json,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_metrics(args: MetricsArgs, analyzer: &Analyzer, output: Output) -> anyhow::Result<()> {
    let input: CompanyInput = read_json(&args.company)?;
    let percentiles: Vec<SectorPercentileRow> = read_json(&args.percentiles)?;

    let report = analyzer.metrics_report(&input.record, &input.statements, &percentiles);
    match output {
        Output::Json => print_json(&report),
        Output::Table => {
            print_metrics(&report);
            Ok(())
        }
    }
}

fn handle_value(args: ValueArgs, analyzer: Analyzer, output: Output) -> anyhow::Result<()> {
    let analyzer = match args.years {
        Some(years) => analyzer.with_projection_years(years)?,
        None => analyzer,
    };
    let company: CompanyRecord = read_json(&args.company)?;
    let params: Vec<SectorParameters> = read_json(&args.params)?;

    let report = analyzer.valuation_report(&company, &params);
    match output {
        Output::Json => print_json(&report),
        Output::Table => {
            print_valuation(&report);
            Ok(())
        }
    }
}

fn handle_predict(args: PredictArgs, analyzer: &Analyzer, output: Output) -> anyhow::Result<()> {
    let signals: PredictabilitySignals = read_json(&args.signals)?;

    let result = analyzer.predictability(&signals);
    match output {
        Output::Json => print_json(&result),
        Output::Table => {
            print_predictability(&result);
            Ok(())
        }
    }
}

fn handle_analyze(args: AnalyzeArgs, analyzer: &Analyzer, output: Output) -> anyhow::Result<()> {
    let input: CompanyInput = read_json(&args.company)?;
    let tables = SectorTables {
        parameters: read_json(&args.params)?,
        percentiles: read_json(&args.percentiles)?,
    };

    let analysis = analyzer.analyze(&input, &tables);
    match output {
        Output::Json => print_json(&analysis),
        Output::Table => {
            print_metrics(&analysis.metrics);
            print_valuation(&analysis.valuation);
            print_predictability(&analysis.predictability);
            Ok(())
        }
    }
}

/// The batch as printed, after the optional class filter.
#[derive(Serialize)]
struct BatchView<'a> {
    results: Vec<&'a DealSummary>,
    failures: &'a [BatchFailure],
}

fn handle_batch(args: BatchArgs, analyzer: &Analyzer, output: Output) -> anyhow::Result<()> {
    // Items are decoded one by one inside the batch, so a malformed entry
    // fails alone.
    let companies: Vec<serde_json::Value> = read_json(&args.companies)?;
    let params: Vec<SectorParameters> = read_json(&args.params)?;

    let report = analyzer.run_batch_values(&companies, &params);
    let view = batch_view(&report, args.class);

    match output {
        Output::Json => print_json(&view),
        Output::Table => {
            print_batch(&view);
            println!(
                "Valued {} of {} companies; {} failed.",
                report.results.len(),
                report.total(),
                report.failures.len()
            );
            Ok(())
        }
    }
}

fn batch_view(report: &BatchReport, class: Option<GrowthClass>) -> BatchView<'_> {
    let results = match class {
        Some(class) => report.with_class(class).collect(),
        None => report.results.iter().collect(),
    };
    BatchView {
        results,
        failures: &report.failures,
    }
}

// ==============================================================================
// Input / Output Helpers
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded input file.");
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

fn amount(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(2).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn ratio(value: Option<Decimal>) -> String {
    value
        .map(|v| v.round_dp(4).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn percent(value: Option<Decimal>) -> String {
    value
        .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED))
        .map(|v| format!("{}%", v.round_dp(2)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn print_metrics(report: &MetricsReport) {
    println!(
        "Metrics for {} (sector {})",
        report.company.as_deref().unwrap_or("<unnamed>"),
        report
            .category_code
            .as_ref()
            .map_or("N/A".to_string(), |code| code.to_string())
    );
    if report.sector_percentiles.is_none() {
        println!("No percentile row for this sector.");
    }

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value", "Position", "Rank", "Sector P10 | P25 | P50 | P75 | P90"]);
    for metric in Metric::ALL {
        let value = ratio(report.metrics.get(metric));
        let row = match report.positions.get(&metric) {
            Some(PercentileRank::Ranked { position, rank, range }) => {
                vec![metric.key().to_string(), value, position.to_string(), rank.clone(), range.clone()]
            }
            _ => vec![metric.key().to_string(), value, "N/A".into(), "N/A".into(), "N/A".into()],
        };
        table.add_row(row);
    }
    println!("{table}");
}

fn print_valuation(report: &ValuationReport) {
    let valuation = &report.valuation;
    println!(
        "DCF valuation for {} over {} years",
        report.company.as_deref().unwrap_or("<unnamed>"),
        valuation.years
    );

    let mut summary = new_table();
    summary.set_header(vec!["Figure", "Value"]);
    summary.add_row(vec!["EV current".to_string(), amount(valuation.ev_current)]);
    summary.add_row(vec!["EV DCF".to_string(), amount(valuation.ev_dcf)]);
    summary.add_row(vec!["Growth expected".to_string(), percent(valuation.growth_expected)]);
    summary.add_row(vec![
        "Classification".to_string(),
        report.classification.map_or("N/A".to_string(), |class| class.to_string()),
    ]);
    summary.add_row(vec!["re".to_string(), ratio(valuation.params.re)]);
    summary.add_row(vec!["rd".to_string(), ratio(valuation.params.rd)]);
    summary.add_row(vec!["wacc".to_string(), ratio(valuation.params.wacc)]);
    summary.add_row(vec!["g".to_string(), ratio(valuation.params.g)]);
    println!("{summary}");

    let mut flows = new_table();
    flows.set_header(vec!["Year", "FCF", "Discount factor", "Discounted FCF"]);
    flows.add_row(vec!["0".to_string(), amount(valuation.fcf0), "-".into(), "-".into()]);
    for (year, ((fcf, factor), discounted)) in valuation
        .fcfs
        .iter()
        .zip(&valuation.discount_factors)
        .zip(&valuation.discounted_fcfs)
        .enumerate()
    {
        flows.add_row(vec![(year + 1).to_string(), amount(*fcf), ratio(*factor), amount(*discounted)]);
    }
    flows.add_row(vec![
        "TV".to_string(),
        amount(valuation.terminal_value),
        ratio(valuation.discount_factors.last().copied().flatten()),
        amount(valuation.discounted_terminal_value),
    ]);
    println!("{flows}");
}

fn print_predictability(result: &PredictabilityResult) {
    println!("Predictability: {} ({})", result.leaf_value, result.category);

    let mut table = new_table();
    table.set_header(vec!["Step", "Check"]);
    for (step, line) in result.decision_path.iter().enumerate() {
        table.add_row(vec![(step + 1).to_string(), line.clone()]);
    }
    println!("{table}");
}

fn print_batch(view: &BatchView<'_>) {
    let mut results = new_table();
    results.set_header(vec!["#", "Company", "EV DCF", "Growth", "Classification"]);
    for summary in &view.results {
        results.add_row(vec![
            summary.index.to_string(),
            summary.company.clone().unwrap_or_default(),
            amount(Some(summary.ev_dcf)),
            percent(Some(summary.growth_expected)),
            summary.classification.to_string(),
        ]);
    }
    println!("{results}");

    if !view.failures.is_empty() {
        let mut failures = new_table();
        failures.set_header(vec!["#", "Company", "Reason"]);
        for failure in view.failures {
            failures.add_row(vec![
                failure.index.to_string(),
                failure.company.clone().unwrap_or_default(),
                failure.reason.clone(),
            ]);
        }
        println!("{failures}");
    }
}
