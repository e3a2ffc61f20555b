use serde::{Deserialize, Serialize};

use super::SeriesError;

/// Raw potentiostat recording as loaded from an instrument export.
///
/// Potential is in volts, current in amps and elapsed time in seconds. The
/// three columns are index-aligned and always share one length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvScan {
    volts: Vec<f64>,
    amps: Vec<f64>,
    time: Vec<f64>,
}

impl CvScan {
    /// Build a scan from aligned columns
    pub fn new(volts: Vec<f64>, amps: Vec<f64>, time: Vec<f64>) -> Result<Self, SeriesError> {
        if volts.len() != amps.len() || volts.len() != time.len() {
            return Err(SeriesError::LengthMismatch {
                potential: volts.len(),
                current: amps.len(),
                time: time.len(),
            });
        }
        Ok(Self { volts, amps, time })
    }

    /// Build a scan whose time axis is `i * sample_interval`.
    ///
    /// Used for exports that carry no time column.
    pub fn with_sample_interval(
        volts: Vec<f64>,
        amps: Vec<f64>,
        sample_interval: f64,
    ) -> Result<Self, SeriesError> {
        let time = elapsed_time(volts.len(), sample_interval);
        Self::new(volts, amps, time)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.volts.len()
    }

    /// True when the scan holds no samples
    pub fn is_empty(&self) -> bool {
        self.volts.is_empty()
    }

    /// Potential column (V)
    pub fn volts(&self) -> &[f64] {
        &self.volts
    }

    /// Current column (A)
    pub fn amps(&self) -> &[f64] {
        &self.amps
    }

    /// Elapsed time column (s)
    pub fn time(&self) -> &[f64] {
        &self.time
    }
}

/// Evenly spaced elapsed-time axis of `len` samples
pub fn elapsed_time(len: usize, sample_interval: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 * sample_interval).collect()
}

/// One row of an averaged polarization-curve export.
///
/// Numeric cells left empty in the export are `None`; the row keeps its
/// position so sweep selection still counts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarizationRecord {
    /// Sub-protocol label, e.g. "O2 Pol 1"
    #[serde(rename = "Sub Protocol")]
    pub sub_protocol: String,

    /// Current density in A/cm^2
    #[serde(rename = "Current Density FB (A/cm2)")]
    pub current_density: Option<f64>,

    /// Load bank voltage in V
    #[serde(rename = "Load Bank Voltage (V)")]
    pub load_voltage: Option<f64>,

    /// High-frequency resistance in Ohm*cm^2
    #[serde(rename = "HFR (Ohm-cm2)")]
    pub hfr: Option<f64>,
}

impl PolarizationRecord {
    /// True when the row belongs to an oxygen sub-protocol
    pub fn is_o2(&self) -> bool {
        self.sub_protocol.contains("O2")
    }

    /// True when every numeric field is present
    pub fn is_complete(&self) -> bool {
        self.current_density.is_some() && self.load_voltage.is_some() && self.hfr.is_some()
    }
}
