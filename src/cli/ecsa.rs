use anyhow::{bail, Context, Result};
use log::info;

use fcmetrics::bounds::{Point, SelectionMode};
use fcmetrics::pipeline::{reduce_ecsa, EcsaInput};
use fcmetrics::report::ReductionReport;
use fcmetrics::series::{IndexRange, PotentiostatTable, TableLayout};

use super::{Config, EcsaArgs};

/// Sample spacing assumed when neither flag nor config gives one (s)
pub(super) const DEFAULT_SAMPLE_INTERVAL: f64 = 0.01;

pub fn run(args: EcsaArgs, config: &Config) -> Result<()> {
    let mut cell = args.cell.resolve(config)?;
    let ecsa = &config.ecsa;

    let layout = table_layout(
        args.header_line.or(ecsa.header_line),
        args.dta || ecsa.dta.unwrap_or(false),
    );
    info!("Reading CV data from {}", args.input.display());
    let table = PotentiostatTable::from_path(&args.input, layout)
        .with_context(|| format!("Failed to read potentiostat table: {}", args.input.display()))?;
    let sample_interval = args
        .sample_interval
        .or(ecsa.sample_interval_s)
        .unwrap_or(DEFAULT_SAMPLE_INTERVAL);
    let scan = table
        .to_scan(sample_interval)
        .context("Failed to build CV scan from table")?;
    info!("Loaded {} samples", scan.len());

    let range = resolve_range(args.range.as_deref(), ecsa.range, scan.len())?;

    let points: Vec<Point> = if args.points.is_empty() {
        ecsa.points
            .as_ref()
            .map(|points| points.iter().copied().map(Point::from).collect())
            .unwrap_or_default()
    } else {
        args.points
    };
    if points.is_empty() {
        bail!("No picking points given; pass four --point values or set [ecsa] points");
    }

    let mode_name = args
        .mode
        .as_deref()
        .or(ecsa.mode.as_deref())
        .unwrap_or("voltage");
    let mode = SelectionMode::from_parts(
        mode_name,
        args.v_up.or(ecsa.v_up),
        args.v_down.or(ecsa.v_down),
    )
    .context("Invalid bound selection mode")?;

    let input = EcsaInput {
        label: args.label,
        scan: &scan,
        range,
        points,
        mode,
    };
    let reduction = reduce_ecsa(&input, &cell).context("ECSA reduction failed")?;
    cell.record(reduction.cycle_result())
        .context("Failed to record ECSA on cell")?;

    let mut report = ReductionReport::new(cell);
    report.ecsa.push(reduction);
    println!("{}", report.format_colored());

    if let Some(path) = &args.json {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

pub(super) fn table_layout(header_line: Option<usize>, dta: bool) -> TableLayout {
    let mut layout = if dta {
        TableLayout::dta(0)
    } else {
        TableLayout::exported_text()
    };
    if let Some(header_line) = header_line {
        layout.header_line = header_line;
    }
    layout
}

pub(super) fn resolve_range(
    flag: Option<&[usize]>,
    file: Option<[usize; 2]>,
    len: usize,
) -> Result<IndexRange> {
    match (flag, file) {
        (Some([start, end]), _) => Ok(IndexRange::span(*start, *end)),
        (Some(other), _) => bail!("--range takes START END, got {} values", other.len()),
        (None, Some([start, end])) => Ok(IndexRange::span(start, end)),
        (None, None) => Ok(IndexRange::full(len)),
    }
}
