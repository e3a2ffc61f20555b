use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::MetricsError;
use crate::integrate::{AreaResult, MassAreaResult};
use crate::units::platinum_mass_g;

/// What a metric value is normalized by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Per cm^2 of electrode
    GeometricArea,
    /// Per unit mass of platinum
    PlatinumMass,
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::GeometricArea => write!(f, "per-geometric-area"),
            Basis::PlatinumMass => write!(f, "per-platinum-mass"),
        }
    }
}

/// Physical unit of a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// cm^2_Pt / cm^2
    Cm2PtPerCm2,
    /// m^2_Pt / g_Pt
    M2PtPerGPt,
    /// mA / cm^2
    MaPerCm2,
    /// mA / mg_Pt
    MaPerMgPt,
}

impl Unit {
    /// Normalization basis of the unit
    pub fn basis(&self) -> Basis {
        match self {
            Unit::Cm2PtPerCm2 | Unit::MaPerCm2 => Basis::GeometricArea,
            Unit::M2PtPerGPt | Unit::MaPerMgPt => Basis::PlatinumMass,
        }
    }

    /// Plain-text unit label
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Cm2PtPerCm2 => "cm2_Pt/cm2",
            Unit::M2PtPerGPt => "m2_Pt/g_Pt",
            Unit::MaPerCm2 => "mA/cm2",
            Unit::MaPerMgPt => "mA/mg_Pt",
        }
    }
}

/// Which quantity a value describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// ECSA from the upper branch
    EcsaUpper,
    /// ECSA from the lower branch
    EcsaLower,
    /// Activity at the reference voltage
    Activity,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::EcsaUpper => write!(f, "ECSA upper"),
            MetricKind::EcsaLower => write!(f, "ECSA lower"),
            MetricKind::Activity => write!(f, "activity"),
        }
    }
}

/// One normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Quantity
    pub kind: MetricKind,
    /// Unit
    pub unit: Unit,
    /// Value, unrounded
    pub value: f64,
}

/// Values derived from one test stage of a cell, merged into it as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    /// Stage label, e.g. "BOT" or "30K"
    pub label: String,
    /// Derived values
    pub values: Vec<MetricValue>,
}

impl CycleResult {
    /// Empty result for a stage
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: Vec::new(),
        }
    }

    /// Add one value
    pub fn with(mut self, kind: MetricKind, unit: Unit, value: f64) -> Self {
        self.values.push(MetricValue { kind, unit, value });
        self
    }

    /// ECSA of both branches per platinum mass
    pub fn ecsa_per_mass(label: impl Into<String>, area: &MassAreaResult) -> Self {
        Self::new(label)
            .with(MetricKind::EcsaUpper, Unit::M2PtPerGPt, area.upper)
            .with(MetricKind::EcsaLower, Unit::M2PtPerGPt, area.lower)
    }

    /// ECSA of both branches per geometric area
    pub fn ecsa_per_area(label: impl Into<String>, area: &AreaResult) -> Self {
        Self::new(label)
            .with(MetricKind::EcsaUpper, Unit::Cm2PtPerCm2, area.upper.area)
            .with(MetricKind::EcsaLower, Unit::Cm2PtPerCm2, area.lower.area)
    }

    /// Mass activity at the reference voltage
    pub fn mass_activity(label: impl Into<String>, ma_per_mg: f64) -> Self {
        Self::new(label).with(MetricKind::Activity, Unit::MaPerMgPt, ma_per_mg)
    }

    /// Specific current density at the reference voltage
    pub fn reference_current(label: impl Into<String>, ma_per_cm2: f64) -> Self {
        Self::new(label).with(MetricKind::Activity, Unit::MaPerCm2, ma_per_cm2)
    }
}

/// A recorded value tagged with its stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Stage label
    pub cycle: String,
    /// Value
    pub metric: MetricValue,
}

/// One physical test article and the metrics recorded across its stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CellRecord")]
pub struct Cell {
    id: String,
    area_cm2: f64,
    loading_mg_cm2: f64,
    basis: Option<Basis>,
    entries: Vec<CellEntry>,
}

/// Serialized form of a [`Cell`], checked before it becomes one
#[derive(Deserialize)]
struct CellRecord {
    id: String,
    area_cm2: f64,
    loading_mg_cm2: f64,
    basis: Option<Basis>,
    entries: Vec<CellEntry>,
}

impl TryFrom<CellRecord> for Cell {
    type Error = MetricsError;

    fn try_from(record: CellRecord) -> Result<Self, Self::Error> {
        let mut cell = Cell::new(record.id, record.area_cm2, record.loading_mg_cm2)?;
        for entry in &record.entries {
            let found = entry.metric.unit.basis();
            match record.basis {
                Some(expected) if expected == found => {}
                expected => {
                    return Err(MetricsError::UnitMismatch {
                        cell: cell.id,
                        expected: expected.unwrap_or(found),
                        found,
                    });
                }
            }
        }
        cell.basis = record.basis;
        cell.entries = record.entries;
        Ok(cell)
    }
}

impl Cell {
    /// New cell with no recorded metrics
    pub fn new(
        id: impl Into<String>,
        area_cm2: f64,
        loading_mg_cm2: f64,
    ) -> Result<Self, MetricsError> {
        let id = id.into();
        let valid = |v: f64| v > 0.0 && v.is_finite();
        if !valid(area_cm2) || !valid(loading_mg_cm2) {
            return Err(MetricsError::InvalidCell {
                id,
                area: area_cm2,
                loading: loading_mg_cm2,
            });
        }
        Ok(Self {
            id,
            area_cm2,
            loading_mg_cm2,
            basis: None,
            entries: Vec::new(),
        })
    }

    /// Identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Electrode area (cm^2)
    pub fn area_cm2(&self) -> f64 {
        self.area_cm2
    }

    /// Catalyst loading (mg/cm^2)
    pub fn loading_mg_cm2(&self) -> f64 {
        self.loading_mg_cm2
    }

    /// Platinum mass (g)
    pub fn platinum_mass_g(&self) -> f64 {
        platinum_mass_g(self.loading_mg_cm2, self.area_cm2)
    }

    /// Normalization basis fixed by the first recorded value
    pub fn basis(&self) -> Option<Basis> {
        self.basis
    }

    /// Every recorded value in recording order
    pub fn entries(&self) -> &[CellEntry] {
        &self.entries
    }

    /// Merge a stage result.
    ///
    /// Either every value is appended or, on a basis mismatch, none is.
    pub fn record(&mut self, result: CycleResult) -> Result<(), MetricsError> {
        let mut basis = self.basis;
        for value in &result.values {
            let found = value.unit.basis();
            match basis {
                Some(expected) if expected != found => {
                    return Err(MetricsError::UnitMismatch {
                        cell: self.id.clone(),
                        expected,
                        found,
                    });
                }
                _ => basis = Some(found),
            }
        }

        debug!(
            "Cell '{}': recording {} values for {}",
            self.id,
            result.values.len(),
            result.label
        );
        self.basis = basis;
        let cycle = result.label;
        self.entries
            .extend(result.values.into_iter().map(|metric| CellEntry {
                cycle: cycle.clone(),
                metric,
            }));
        Ok(())
    }

    /// Values of one kind as `(stage, value)` in recording order
    pub fn series(&self, kind: MetricKind) -> Vec<(&str, f64)> {
        self.entries
            .iter()
            .filter(|e| e.metric.kind == kind)
            .map(|e| (e.cycle.as_str(), e.metric.value))
            .collect()
    }

    /// Percent change of each value of `kind` from the first recorded one.
    ///
    /// Empty when the first value is zero or not finite.
    pub fn relative_change(&self, kind: MetricKind) -> Vec<(&str, f64)> {
        let series = self.series(kind);
        let Some(&(cycle, first)) = series.first() else {
            return Vec::new();
        };
        if first == 0.0 || !first.is_finite() {
            warn!(
                "Cell '{}' {} baseline at {} is {}; no relative change",
                self.id, kind, cycle, first
            );
            return Vec::new();
        }
        let changes: Vec<(&str, f64)> = series
            .into_iter()
            .map(|(cycle, value)| (cycle, 100.0 * (value - first) / first))
            .collect();
        info!("Cell '{}' {} change: {:?}", self.id, kind, changes);
        changes
    }
}

/// Merge `result` into `cell`
pub fn record(cell: &mut Cell, result: CycleResult) -> Result<(), MetricsError> {
    cell.record(result)
}
