use anyhow::{Context, Result};
use chartmap::infer::{infer_schema, suggest_mapping};
use chartmap::parser::parse_mapping_str;
use chartmap::resolve::resolve_mapping;
use chartmap::{build_resolved, csv_reader, AxisMapping, ChartKind, ChartOptions, Dataset};
use clap::Parser;
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chartmap")]
#[command(about = "Shape tabular data from stdin into chart JSON", long_about = None)]
struct Args {
    /// Chart kind (bar, line, area, pie, doughnut, scatter, radar, bar3d, scatter3d, surface3d)
    #[arg(required_unless_present = "schema")]
    kind: Option<String>,

    /// Role mapping (e.g., 'x: month, y: [sales, cost], group: "Sales Region"')
    mapping: Option<String>,

    /// Read a JSON dataset instead of CSV
    #[arg(long)]
    json: bool,

    /// Print the inferred column schema and exit
    #[arg(long)]
    schema: bool,

    /// Fill unmapped required roles from the inferred schema
    #[arg(long)]
    auto: bool,

    /// Chart options as a JSON file
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Series color, in order; repeat for more
    #[arg(long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    #[arg(long)]
    dark_mode: bool,

    #[arg(long)]
    no_legend: bool,

    #[arg(long)]
    no_animation: bool,

    /// Report non-numeric cells in numeric roles instead of reading them as 0
    #[arg(long)]
    strict: bool,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log dispatch decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn read_dataset(json: bool) -> Result<Dataset> {
    if json {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read JSON from stdin")?;
        let value: serde_json::Value =
            serde_json::from_str(&input).context("Failed to parse JSON dataset")?;
        Dataset::from_json(&value)
    } else {
        csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")
    }
}

fn load_options(args: &Args) -> Result<ChartOptions> {
    let mut options = match &args.options {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse options file {}", path.display()))?
        }
        None => ChartOptions::default(),
    };

    if !args.colors.is_empty() {
        options.colors = args.colors.clone();
    }
    options.dark_mode |= args.dark_mode;
    options.show_legend &= !args.no_legend;
    options.animation &= !args.no_animation;
    options.strict_numeric |= args.strict;
    Ok(options)
}

/// Explicit roles win; suggestions only fill the gaps.
fn fill_from_suggestion(mut mapping: AxisMapping, data: &Dataset, kind: ChartKind) -> AxisMapping {
    let suggested = suggest_mapping(data, kind);
    for role in suggested.roles() {
        if !mapping.is_bound(role) {
            mapping.bind(role, suggested.columns(role).to_vec());
        }
    }
    mapping
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut handle, value)
    } else {
        serde_json::to_writer(&mut handle, value)
    };
    written.context("Failed to write JSON to stdout")?;
    writeln!(handle).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data = read_dataset(args.json)?;

    if args.schema {
        return write_json(&infer_schema(&data), args.pretty);
    }

    let kind: ChartKind = args.kind.as_deref().unwrap_or_default().parse()?;

    let raw = match &args.mapping {
        Some(text) => parse_mapping_str(text)?,
        None => Default::default(),
    };
    let mut mapping = resolve_mapping(&raw);
    if args.auto {
        mapping = fill_from_suggestion(mapping, &data, kind);
    }

    let options = load_options(&args)?;
    let result = build_resolved(&data, kind, &mapping, &options);
    write_json(&result, args.pretty)?;

    if result.is_error() {
        std::process::exit(2);
    }
    Ok(())
}
