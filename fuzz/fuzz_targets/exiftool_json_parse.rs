//! Fuzz target for exiftool JSON parsing and mapping.

#![no_main]

use imgtag::batch::map_batch;
use imgtag::extract::exiftool::from_exiftool_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(entries) = from_exiftool_str(json) {
            let _ = map_batch(&entries);
        }
    }
});
