//! Fuzz target for hierarchical tag parsing.
//!
//! This fuzzer feeds arbitrary strings to the tag tree parser, checking for
//! panics, crashes, or hangs in both the markup and delimited paths.

#![no_main]

use imgtag::meta::{Field, TagTree};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 1024 * 1024 {
        return;
    }

    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(tree) = TagTree::parse(Field::Categories, raw) {
            let _ = TagTree::flatten_to_tags(&tree.flatten());
        }
    }
});
