//! graxx — streaming integer percentiles and moving averages.
//!
//! Run with:  `RUST_LOG=debug graxx summary depths.txt`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use graxx_config::GraxxConfig;
use graxx_core::Sample;
use graxx_matrix::{convert_columns, Cell, ColumnType};
use graxx_stats::{IntegerStats, RollingWindow};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Config file (default: $XDG_CONFIG_HOME/graxx/graxx.toml).
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Histogram capacity, overriding the config file.
    #[clap(long, global = true)]
    capacity: Option<usize>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print count, mean, median, percentiles and threshold coverage.
    Summary {
        /// Read this zero-based column of tab-separated input.
        #[clap(long)]
        column: Option<usize>,

        /// Emit the report as JSON.
        #[clap(long)]
        json: bool,

        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Write the per-bucket histogram dump as TSV.
    Dump { file: Option<PathBuf> },
    /// Print the moving average after each input value.
    Smooth {
        /// Window size, overriding the config file.
        #[clap(long)]
        window: Option<usize>,

        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    // Logs go to stderr so stdout stays machine-readable. The subscriber is
    // installed before the config is read so its warnings are not lost.
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_overrides = from_env.is_some();
    let (subscriber, filter) = logging(
        io::stderr,
        from_env.unwrap_or_else(|| EnvFilter::new("warn")),
    );
    subscriber.init();

    let config = load_config(opt.config.clone(), opt.capacity)?;
    if !env_overrides {
        filter.reload(EnvFilter::new(&config.log_level))?;
    }

    tracing::debug!("graxx v{} starting", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match opt.command {
        Command::Summary { column, json, file } => {
            let input = open_input(file.as_deref())?;
            let stats = match column {
                Some(column) => load_column(&config, input, column)?,
                None => IntegerStats::from_reader(config.stats.capacity, input)
                    .context("reading values")?,
            };
            let report = Report::build(&stats, &config)?;
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                report.write_text(&mut out)?;
            }
        }
        Command::Dump { file } => {
            let input = open_input(file.as_deref())?;
            let stats = IntegerStats::from_reader(config.stats.capacity, input)
                .context("reading values")?;
            stats.write_tsv(&mut out)?;
        }
        Command::Smooth { window, file } => {
            let input = open_input(file.as_deref())?;
            smooth(input, window.unwrap_or(config.window.size), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Build the stderr subscriber; the returned handle swaps its filter later.
fn logging<W>(
    writer: W,
    filter: EnvFilter,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (subscriber, handle)
}

fn load_config(path: Option<PathBuf>, capacity: Option<usize>) -> Result<GraxxConfig> {
    let path = path.unwrap_or_else(graxx_config::default_path);
    let mut config =
        graxx_config::load(&path).with_context(|| format!("loading {}", path.display()))?;
    if let Some(capacity) = capacity {
        config.stats.capacity = capacity;
    }
    Ok(config)
}

fn open_input(file: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match file {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Ok(Box::new(BufReader::new(f)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Load one column of a tab-separated file, widening column types as needed.
fn load_column(config: &GraxxConfig, input: impl BufRead, column: usize) -> Result<IntegerStats> {
    let mut stats = IntegerStats::new(config.stats.capacity)?;
    let mut types: Vec<ColumnType> = Vec::new();

    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split('\t').collect();
        if types.len() < fields.len() {
            types.resize(fields.len(), ColumnType::Integer);
        }
        let cells = convert_columns(&fields, &mut types);
        let Some(cell) = cells.into_iter().nth(column) else {
            bail!("line {} has no column {column}", n + 1);
        };
        let sample = match cell {
            Cell::Integer(v) => Sample::Int(v.into()),
            Cell::Long(v) => Sample::Int(v),
            Cell::Float(v) => Sample::Float(v.into()),
            Cell::Double(v) => Sample::Float(v),
            Cell::Text(v) => Sample::Text(v),
        };
        stats
            .push_sample(&sample)
            .with_context(|| format!("line {}", n + 1))?;
    }
    Ok(stats)
}

fn smooth(input: impl BufRead, size: usize, out: &mut impl Write) -> Result<()> {
    let mut window = RollingWindow::new(size)?;
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let value: f64 = line
            .trim()
            .parse()
            .with_context(|| format!("line {}: {line:?} is not a number", n + 1))?;
        window.push(value);
        writeln!(out, "{}", window.mean())?;
    }
    Ok(())
}

/// Summary report for `summary`.
///
/// Undefined results (`mean` and `percentage_above` on empty input) are
/// `NaN` in the text report and `null` in the JSON report, since JSON has
/// no NaN.
#[derive(Debug, Serialize)]
struct Report {
    count: u64,
    mean: f64,
    min: Option<u64>,
    max: Option<u64>,
    /// `-1` when undefined.
    median: i64,
    percentiles: Vec<(u32, i64)>,
    percentage_above: Vec<(usize, f64)>,
}

impl Report {
    fn build(stats: &IntegerStats, config: &GraxxConfig) -> Result<Self> {
        let summary = stats.summary();
        let percentiles = config
            .stats
            .percentiles
            .iter()
            .map(|&p| -> Result<(u32, i64)> { Ok((p, sentinel(stats.percentile(p)?))) })
            .collect::<Result<Vec<_>>>()?;
        let percentage_above = config
            .stats
            .thresholds
            .iter()
            .map(|&t| (t, stats.percentage_above(t)))
            .collect();

        Ok(Self {
            count: stats.total_count(),
            mean: summary.mean(),
            min: summary.min(),
            max: summary.max(),
            median: sentinel(stats.median()),
            percentiles,
            percentage_above,
        })
    }

    fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "count\t{}", self.count)?;
        writeln!(out, "mean\t{}", self.mean)?;
        if let (Some(min), Some(max)) = (self.min, self.max) {
            writeln!(out, "min\t{min}")?;
            writeln!(out, "max\t{max}")?;
        }
        writeln!(out, "median\t{}", self.median)?;
        for (p, value) in &self.percentiles {
            writeln!(out, "p{p}\t{value}")?;
        }
        for (t, pct) in &self.percentage_above {
            writeln!(out, "above_{t}\t{pct:.2}")?;
        }
        Ok(())
    }
}

fn sentinel(value: Option<usize>) -> i64 {
    value.and_then(|v| i64::try_from(v).ok()).unwrap_or(-1)
}
