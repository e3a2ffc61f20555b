#![no_main]

use fcmetrics::series::read_polarization;
use fcmetrics::tafel::{o2_sweeps, DEFAULT_SWEEP_POINTS};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok(records) = read_polarization(Cursor::new(data), b',') {
        let _ = o2_sweeps(&records, DEFAULT_SWEEP_POINTS);
    }
});
