use anyhow::{Context, Result};
use log::info;

#[cfg(feature = "colorized_output")]
use console::style;

use fcmetrics::extrema::{locate_with_order, Extrema};
use fcmetrics::series::{extract, PotentiostatTable, Sweep};

use super::ecsa::{resolve_range, table_layout, DEFAULT_SAMPLE_INTERVAL};
use super::{Config, ExtremaArgs};

pub fn run(args: ExtremaArgs, config: &Config) -> Result<()> {
    let cell = args.cell.resolve(config)?;
    let ecsa = &config.ecsa;

    let layout = table_layout(
        args.header_line.or(ecsa.header_line),
        args.dta || ecsa.dta.unwrap_or(false),
    );
    let table = PotentiostatTable::from_path(&args.input, layout)
        .with_context(|| format!("Failed to read potentiostat table: {}", args.input.display()))?;
    let scan = table
        .to_scan(ecsa.sample_interval_s.unwrap_or(DEFAULT_SAMPLE_INTERVAL))
        .context("Failed to build CV scan from table")?;

    let range = resolve_range(args.range.as_deref(), ecsa.range, scan.len())?;
    let sweep = extract(&scan, &range, cell.area_cm2()).context("Failed to extract window")?;
    let extrema = locate_with_order(sweep.current_density(), args.order);
    info!(
        "{} minima, {} maxima in {} samples",
        extrema.minima.len(),
        extrema.maxima.len(),
        sweep.len()
    );

    print!("{}", format_extrema(&sweep, &extrema));
    Ok(())
}

fn format_extrema(sweep: &Sweep, extrema: &Extrema) -> String {
    let mut output = String::new();
    for (title, indices) in [("Minima", &extrema.minima), ("Maxima", &extrema.maxima)] {
        #[cfg(feature = "colorized_output")]
        output.push_str(&format!("{}\n", style(title).bold().cyan()));
        #[cfg(not(feature = "colorized_output"))]
        output.push_str(&format!("{}\n", title));

        if indices.is_empty() {
            output.push_str("  (none)\n");
        }
        for &i in indices {
            output.push_str(&format!(
                "  {:>6}  {:>8.4} V  {:>10.4} mA/cm2\n",
                i,
                sweep.potential()[i],
                sweep.current_density()[i]
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lists_each_extremum() {
        let sweep = Sweep::from_parts(
            vec![0.1, 0.2, 0.3, 0.4, 0.5],
            vec![3.0, 1.0, 2.0, 5.0, 4.0],
            vec![0.0, 0.01, 0.02, 0.03, 0.04],
        )
        .unwrap();
        let extrema = locate_with_order(sweep.current_density(), 1);

        let text = format_extrema(&sweep, &extrema);
        assert!(text.contains("Minima"));
        assert!(text.contains("0.2000 V"));
        assert!(text.contains("0.4000 V"));
        assert!(!text.contains("(none)"));
    }
}
