use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use wdi_dashboard::config::{COUNTRY_COLUMN, HEADER_ROWS, YEAR_ALLOW_LIST};
use wdi_dashboard::{
    Indicator, IndicatorSpec, Sources, WideTable, charts, plotly, reshape, stats, storage,
};

#[derive(Parser, Debug)]
#[command(
    name = "wdi-dashboard",
    version,
    about = "Reshape World Bank indicator exports into dashboard chart data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the five dashboard figures as Plotly JSON.
    Charts(ChartsArgs),
    /// Reshape one export into tidy rows (and optionally save and print stats).
    Clean(CleanArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum IndicatorArg {
    Gdp,
    GdpPerCapita,
    Exports,
    Imports,
    Fdi,
}

impl From<IndicatorArg> for Indicator {
    fn from(arg: IndicatorArg) -> Self {
        match arg {
            IndicatorArg::Gdp => Indicator::Gdp,
            IndicatorArg::GdpPerCapita => Indicator::GdpPerCapita,
            IndicatorArg::Exports => Indicator::Exports,
            IndicatorArg::Imports => Indicator::Imports,
            IndicatorArg::Fdi => Indicator::Fdi,
        }
    }
}

#[derive(Args, Debug)]
struct ChartsArgs {
    /// Directory holding the five World Bank CSV exports under their default names.
    #[arg(long, default_value = "data", conflicts_with = "sources")]
    data_dir: PathBuf,
    /// JSON file mapping gdp, gdp_per_capita, exports, imports, fdi to CSV paths.
    #[arg(long)]
    sources: Option<PathBuf>,
    /// Write figures to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Pretty-print the JSON.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// World Bank wide-format CSV export.
    #[arg(short, long)]
    input: PathBuf,
    /// Year columns to keep, separated by comma or semicolon (default 1990,2000,2010,2019).
    #[arg(short, long, conflicts_with = "all_years")]
    years: Option<String>,
    /// Keep every year column present in the file.
    #[arg(long, default_value_t = false)]
    all_years: bool,
    /// Indicator the export holds; its label names the value column.
    #[arg(long, value_enum)]
    indicator: Option<IndicatorArg>,
    /// Value column label in CSV output (default: the indicator's label, else "value").
    #[arg(long)]
    metric: Option<String>,
    /// Save rows to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-country statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Charts(args) => cmd_charts(args),
        Command::Clean(args) => cmd_clean(args),
    }
}

fn cmd_charts(args: ChartsArgs) -> Result<()> {
    let sources = match &args.sources {
        Some(path) => Sources::from_json_file(path)?,
        None => Sources::from_dir(&args.data_dir),
    };
    let figures = charts::build_charts(&sources).context("build dashboard charts")?;

    match args.out.as_ref() {
        Some(path) => {
            storage::save_figures_json(&figures, path, args.pretty)?;
            eprintln!("Wrote {} figures to {}", figures.len(), path.display());
        }
        None => {
            let v = plotly::figures_json(&figures);
            let s = if args.pretty {
                serde_json::to_string_pretty(&v)?
            } else {
                serde_json::to_string(&v)?
            };
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{s}")?;
        }
    }
    Ok(())
}

fn cmd_clean(args: CleanArgs) -> Result<()> {
    let table = WideTable::from_path(&args.input, HEADER_ROWS)?;
    let years: Vec<String> = match (&args.years, args.all_years) {
        (Some(list), _) => parse_list(list),
        (None, true) => table.year_columns().into_iter().map(String::from).collect(),
        (None, false) => YEAR_ALLOW_LIST.iter().map(|y| y.to_string()).collect(),
    };
    if years.is_empty() {
        bail!("no year columns selected");
    }

    let value_years: Vec<&str> = years.iter().map(String::as_str).collect();
    let mut keep = vec![COUNTRY_COLUMN];
    keep.extend(value_years.iter().copied());
    let points = reshape(&table, &keep, &value_years)
        .with_context(|| format!("reshape {}", args.input.display()))?;

    let metric = match (&args.metric, args.indicator) {
        (Some(m), _) => m.clone(),
        (None, Some(ind)) => IndicatorSpec::for_indicator(ind.into()).metric.to_string(),
        (None, None) => "value".to_string(),
    };

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&points, &metric, path)?,
            "json" => storage::save_json(&points, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    }

    if args.stats {
        for s in stats::grouped_summary(&points) {
            println!(
                "{}  count={} missing={}  min={} max={} mean={} median={}",
                s.country,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
