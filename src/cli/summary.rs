//! Summary and chart CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{MonitorError, MonitorResult};
use crate::export::{export_summary_json, export_summary_yaml};
use crate::models::{current_month, extract_month, month_from_parts};
use crate::reports::{chart_available, Capability, MonthlySummaryReport, SpendingChart};
use crate::storage::Storage;

const CHART_WIDTH: usize = 40;

/// Output format for the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

/// Month selection shared by `summary` and `chart`
#[derive(Debug, Clone, Args)]
pub struct MonthArgs {
    /// Month (YYYY-MM); defaults to the current month
    #[arg(short, long, conflicts_with_all = ["year", "month_number"])]
    pub month: Option<String>,

    /// Year, used together with --month-number
    #[arg(long, requires = "month_number")]
    pub year: Option<String>,

    /// Month number 1-12, used together with --year
    #[arg(long, requires = "year")]
    pub month_number: Option<String>,
}

impl MonthArgs {
    /// Resolve the selected month key
    pub fn resolve(&self) -> MonitorResult<String> {
        match (&self.month, &self.year, &self.month_number) {
            (Some(month), _, _) => extract_month(month),
            (None, Some(year), Some(number)) => month_from_parts(year, number),
            _ => Ok(current_month()),
        }
    }
}

/// Arguments of the `summary` command
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = SummaryFormat::Table)]
    pub format: SummaryFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the summary command
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    args: SummaryArgs,
) -> MonitorResult<()> {
    let month = args.month.resolve()?;
    let (session, _) = storage.load_session(settings.category_rules.clone())?;
    let report = MonthlySummaryReport::generate(&session, &month);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            MonitorError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        SummaryFormat::Table => {
            writer.write_all(report.format_terminal(&settings.currency_symbol).as_bytes())?;
        }
        SummaryFormat::Csv => report.export_csv(&mut writer)?,
        SummaryFormat::Json => export_summary_json(&report, &mut writer)?,
        SummaryFormat::Yaml => export_summary_yaml(&report, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &args.output {
        println!("Summary for {} written to {}", month, path.display());
    }

    Ok(())
}

/// Handle the chart command
pub fn handle_chart_command(
    storage: &Storage,
    settings: &Settings,
    month: MonthArgs,
) -> MonitorResult<()> {
    if let Capability::Unavailable(reason) = chart_available(settings) {
        println!("Chart not available: {}", reason);
        return Ok(());
    }

    let month = month.resolve()?;
    let (session, _) = storage.load_session(settings.category_rules.clone())?;
    let chart = SpendingChart::generate(&session, &month);
    print!(
        "{}",
        chart.format_terminal(CHART_WIDTH, &settings.currency_symbol)
    );

    Ok(())
}
