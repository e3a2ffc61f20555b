//! Presentation of reductions: text summaries and JSON export.
//!
//! Values are rounded here and nowhere else; the JSON export carries them
//! exactly as computed.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "colorized_output")]
use console::style;

use crate::bounds::SelectionMode;
use crate::metrics::{Cell, MetricKind};
use crate::pipeline::{EcsaReduction, MassActivityReduction};

/// Everything reduced for one cell in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionReport {
    /// Creation time
    pub generated_at: DateTime<Utc>,
    /// Cell with its recorded metrics
    pub cell: Cell,
    /// ECSA reductions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ecsa: Vec<EcsaReduction>,
    /// Mass activity reductions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mass_activity: Vec<MassActivityReduction>,
}

impl ReductionReport {
    /// Empty report for a cell
    pub fn new(cell: Cell) -> Self {
        Self {
            generated_at: Utc::now(),
            cell,
            ecsa: Vec::new(),
            mass_activity: Vec::new(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write pretty JSON to `path`
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Text summary, colored when the console feature is enabled
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!(
                "{}\n",
                style(format!("Cell {}", self.cell.id())).bold().cyan()
            ));
            output.push_str(&format!("{}\n", style("=".repeat(40)).cyan()));
            output.push_str(&self.body());
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }

    fn body(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Area: {} cm2, loading: {} mg/cm2 ({:.2} mg Pt)\n",
            self.cell.area_cm2(),
            self.cell.loading_mg_cm2(),
            self.cell.platinum_mass_g() * 1000.0
        ));
        for ecsa in &self.ecsa {
            output.push_str(&format!("\n{}", ecsa));
        }
        for ma in &self.mass_activity {
            output.push_str(&format!("\n{}", ma));
        }

        for kind in [MetricKind::EcsaUpper, MetricKind::EcsaLower, MetricKind::Activity] {
            let changes = self.cell.relative_change(kind);
            if changes.len() < 2 {
                continue;
            }
            output.push_str(&format!("\n{} change from {}:\n", kind, changes[0].0));
            for (cycle, change) in &changes[1..] {
                output.push_str(&format!("  {}: {:+.0} %\n", cycle, change));
            }
        }
        output
    }
}

impl fmt::Display for ReductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cell {}", self.cell.id())?;
        writeln!(f, "{}", "=".repeat(40))?;
        write!(f, "{}", self.body())
    }
}

impl fmt::Display for EcsaReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            SelectionMode::Voltage { v_up, v_down } => {
                format!("voltage (up {} V, down {} V)", v_up, v_down)
            }
            SelectionMode::Edge => "edge".to_string(),
        };
        writeln!(f, "ECSA [{}] bounds by {}", self.label, mode)?;
        writeln!(
            f,
            "  upper {}..={}: {:.2} m2_Pt/g_Pt, {:.2} cm2_Pt/cm2",
            self.bounds.up_start, self.bounds.up_end, self.per_mass.upper, self.area.upper.area
        )?;
        writeln!(
            f,
            "  lower {}..={}: {:.2} m2_Pt/g_Pt, {:.2} cm2_Pt/cm2",
            self.bounds.down_start,
            self.bounds.down_end,
            self.per_mass.lower,
            self.area.lower.area
        )
    }
}

impl fmt::Display for MassActivityReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mass activity [{}]", self.label)?;
        writeln!(
            f,
            "  crossover {:.3} mA/cm2, Tafel slope {:.1} mV/dec (R2 {:.4}, {} points)",
            self.fit.crossover,
            self.fit.tafel_slope_mv_dec(),
            self.fit.line.r_squared,
            self.fit.line.n
        )?;
        writeln!(
            f,
            "  i at {} V: {:.2} mA/cm2, MA: {:.2} mA/mg_Pt",
            self.fit.reference_voltage, self.fit.reference_current, self.mass_activity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CycleResult;

    #[test]
    fn test_report_summary_lists_changes() {
        let mut cell = Cell::new("ST8C5", 50.0, 0.253).unwrap();
        cell.record(CycleResult::mass_activity("BOT", 0.5)).unwrap();
        cell.record(CycleResult::mass_activity("30K", 0.43)).unwrap();

        let text = ReductionReport::new(cell).to_string();
        assert!(text.contains("Cell ST8C5"));
        assert!(text.contains("12.65 mg Pt"));
        assert!(text.contains("activity change from BOT"));
        assert!(text.contains("30K: -14 %"));
    }

    #[test]
    fn test_report_json_keeps_exact_values() {
        let mut cell = Cell::new("ST8C5", 50.0, 0.253).unwrap();
        cell.record(CycleResult::mass_activity("BOT", 0.123456789))
            .unwrap();
        let report = ReductionReport::new(cell);

        let json = report.to_json().unwrap();
        let restored = ReductionReport::from_json(&json).unwrap();
        assert_eq!(restored.cell, report.cell);
        assert!(json.contains("0.123456789"));
        assert!(!json.contains("\"ecsa\""));
    }
}
