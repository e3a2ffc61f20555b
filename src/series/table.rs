//! Readers for tab-delimited instrument exports.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use super::{CvScan, PolarizationRecord, SeriesError};

/// Potential column names, in lookup order
pub const POTENTIAL_COLUMNS: &[&str] = &["Volts", "Vf"];
/// Current column names, in lookup order
pub const CURRENT_COLUMNS: &[&str] = &["Amps", "Im"];
/// Time column names, in lookup order
pub const TIME_COLUMNS: &[&str] = &["Time", "T"];

/// Sub-protocol column of polarization exports
const POLARIZATION_PROTOCOL: &str = "Sub Protocol";

/// Marker cell that opens a new sub-table in DTA files
const TABLE_MARKER: &str = "TABLE";
/// Rows dropped for each marker: the marker, the header and the units row
const TABLE_MARKER_SPAN: usize = 3;

/// Where the header sits and whether a units row follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Number of lines before the header line
    pub header_line: usize,
    /// Drop the first data row (units) after the header
    pub units_row: bool,
}

impl TableLayout {
    /// Text export with 14 preamble lines and no units row
    pub fn exported_text() -> Self {
        Self {
            header_line: 14,
            units_row: false,
        }
    }

    /// Raw DTA file with `header_line` preamble lines and a units row
    pub fn dta(header_line: usize) -> Self {
        Self {
            header_line,
            units_row: true,
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::exported_text()
    }
}

/// Potentiostat export held as text cells; columns are parsed on demand.
#[derive(Debug, Clone)]
pub struct PotentiostatTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PotentiostatTable {
    /// Read a table from a file
    pub fn from_path<P: AsRef<Path>>(path: P, layout: TableLayout) -> Result<Self, SeriesError> {
        let file = File::open(path)?;
        Self::from_reader(file, layout)
    }

    /// Read a table from any byte source
    pub fn from_reader<R: Read>(reader: R, layout: TableLayout) -> Result<Self, SeriesError> {
        let mut reader = BufReader::new(reader);

        // Preamble lines may not be UTF-8, so skip them as bytes.
        let mut skipped = Vec::new();
        for _ in 0..layout.header_line {
            skipped.clear();
            if reader.read_until(b'\n', &mut skipped)? == 0 {
                break;
            }
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();

        let mut rows = Vec::new();
        let mut skip = usize::from(layout.units_row);
        for record in csv_reader.byte_records() {
            let record = record?;
            let cells: Vec<String> = record
                .iter()
                .map(|c| String::from_utf8_lossy(c).trim().to_string())
                .collect();

            if cells.iter().any(|c| c == TABLE_MARKER) {
                skip = TABLE_MARKER_SPAN;
            }
            if skip > 0 {
                skip -= 1;
                continue;
            }
            rows.push(cells);
        }

        debug!("Read {} rows with columns {:?}", rows.len(), headers);
        Ok(Self { headers, rows })
    }

    /// Column names as they appear in the header
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position<'a>(&self, aliases: &[&'a str]) -> Option<(usize, &'a str)> {
        aliases.iter().find_map(|alias| {
            self.headers
                .iter()
                .position(|h| h == alias)
                .map(|i| (i, *alias))
        })
    }

    /// True when any of `aliases` names a column
    pub fn has_column(&self, aliases: &[&str]) -> bool {
        self.position(aliases).is_some()
    }

    /// Parse the first column matching `aliases` as numbers
    pub fn column(&self, aliases: &[&str]) -> Result<Vec<f64>, SeriesError> {
        let (index, name) = self
            .position(aliases)
            .ok_or_else(|| SeriesError::MissingColumn(aliases.join("/")))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let text = cells.get(index).map(String::as_str).unwrap_or("");
                text.parse::<f64>().map_err(|_| SeriesError::Parse {
                    row,
                    column: name.to_string(),
                    value: text.to_string(),
                })
            })
            .collect()
    }

    /// Convert into a typed scan.
    ///
    /// The time column is used when present; otherwise time is synthesized
    /// from `sample_interval`.
    pub fn to_scan(&self, sample_interval: f64) -> Result<CvScan, SeriesError> {
        let volts = self.column(POTENTIAL_COLUMNS)?;
        let amps = self.column(CURRENT_COLUMNS)?;
        if self.has_column(TIME_COLUMNS) {
            CvScan::new(volts, amps, self.column(TIME_COLUMNS)?)
        } else {
            debug!("No time column, using sample interval {} s", sample_interval);
            CvScan::with_sample_interval(volts, amps, sample_interval)
        }
    }
}

/// Field delimiter implied by a file extension: tab for .txt/.tsv, comma otherwise
pub fn delimiter_for<P: AsRef<Path>>(path: P) -> u8 {
    match path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") | Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Read an averaged polarization-curve export from a file
pub fn read_polarization_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PolarizationRecord>, SeriesError> {
    let delimiter = delimiter_for(&path);
    let file = File::open(path)?;
    read_polarization(file, delimiter)
}

/// Read an averaged polarization-curve export.
///
/// Blank padding rows between sub-protocols are skipped. Empty numeric
/// cells become `None` so every O2 row keeps its position. A cell that holds
/// text where a number belongs fails the read on O2 rows and skips the row
/// otherwise.
pub fn read_polarization<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<PolarizationRecord>, SeriesError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in [
        POLARIZATION_PROTOCOL,
        "Current Density FB (A/cm2)",
        "Load Bank Voltage (V)",
        "HFR (Ohm-cm2)",
    ] {
        if !headers.iter().any(|h| h == required) {
            return Err(SeriesError::MissingColumn(required.to_string()));
        }
    }
    let protocol = headers.iter().position(|h| h == POLARIZATION_PROTOCOL);

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let raw = result?;
        if raw.iter().all(str::is_empty) {
            debug!("Skipping blank polarization row {}", row);
            continue;
        }

        match raw.deserialize::<PolarizationRecord>(Some(&headers)) {
            Ok(record) => {
                if record.is_o2() && !record.is_complete() {
                    warn!("Polarization row {} has empty numeric cells", row);
                }
                records.push(record);
            }
            Err(e) => {
                let sub_protocol = protocol.and_then(|i| raw.get(i)).unwrap_or("");
                if sub_protocol.contains("O2") {
                    return Err(SeriesError::Parse {
                        row,
                        column: invalid_field(&headers, &e),
                        value: invalid_value(&raw, &e),
                    });
                }
                warn!("Skipping polarization row {}: {}", row, e);
            }
        }
    }

    debug!("Read {} polarization rows", records.len());
    Ok(records)
}

fn invalid_field(headers: &csv::StringRecord, error: &csv::Error) -> String {
    error_field(error)
        .and_then(|i| headers.get(i))
        .unwrap_or("")
        .to_string()
}

fn invalid_value(raw: &csv::StringRecord, error: &csv::Error) -> String {
    error_field(error)
        .and_then(|i| raw.get(i))
        .unwrap_or("")
        .to_string()
}

fn error_field(error: &csv::Error) -> Option<usize> {
    match error.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.field().map(|f| f as usize),
        _ => None,
    }
}
