//! Mapping many files at once.
//!
//! Each input is mapped independently on the rayon pool. Results are
//! collected by index, so the report follows input order no matter which
//! file finishes first. A failing file only affects its own outcome.

mod report;

pub use report::{BatchReport, FileOutcome};

use std::path::PathBuf;

use rayon::prelude::*;

use crate::extract;
use crate::meta::{map_fields, FieldValues};

/// Maps already extracted field values.
pub fn map_batch(inputs: &[FieldValues]) -> BatchReport {
    let outcomes = inputs
        .par_iter()
        .map(|input| {
            let result = map_fields(input);
            if let Err(err) = &result {
                log::warn!("{}: {}", input.identifier, err);
            }
            FileOutcome {
                identifier: input.identifier.clone(),
                result,
            }
        })
        .collect();

    BatchReport::new(outcomes)
}

/// Extracts and maps image files.
///
/// Extraction errors are passed through unchanged as the file's outcome.
pub fn map_files(paths: &[PathBuf]) -> BatchReport {
    let outcomes = paths
        .par_iter()
        .map(|path| {
            let result = extract::extract_file(path).and_then(|values| map_fields(&values));
            if let Err(err) = &result {
                log::warn!("{}: {}", path.display(), err);
            }
            FileOutcome {
                identifier: path.to_string_lossy().into_owned(),
                result,
            }
        })
        .collect();

    BatchReport::new(outcomes)
}
