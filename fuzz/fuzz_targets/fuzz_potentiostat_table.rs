#![no_main]

use fcmetrics::series::{PotentiostatTable, TableLayout};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // The first byte picks the layout so both export flavours get exercised
    let (layout, body) = match data.split_first() {
        Some((&flag, rest)) if flag & 1 == 1 => (TableLayout::dta(usize::from(flag >> 4)), rest),
        Some((&flag, rest)) => (
            TableLayout {
                header_line: usize::from(flag >> 4),
                units_row: false,
            },
            rest,
        ),
        None => return,
    };

    // Malformed tables must fail with an error, never panic
    if let Ok(table) = PotentiostatTable::from_reader(Cursor::new(body), layout) {
        if let Ok(scan) = table.to_scan(0.01) {
            let _ = fcmetrics::extrema::locate(scan.amps());
        }
    }
});
