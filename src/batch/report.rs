//! Per-file outcomes of a batch run.

use std::fmt;

use crate::error::ImgtagError;
use crate::meta::MetadataRecord;

/// The result of mapping one input.
#[derive(Debug)]
pub struct FileOutcome {
    /// Identifier of the input, as given.
    pub identifier: String,
    pub result: Result<MetadataRecord, ImgtagError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<FileOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    pub fn is_ok(&self) -> bool {
        self.failed_count() == 0
    }

    /// Successfully mapped records, in input order.
    pub fn records(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed inputs with their errors, in input order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ImgtagError)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(err) => Some((o.identifier.as_str(), err)),
        })
    }

    /// Consumes the report, keeping only the records.
    pub fn into_records(self) -> Vec<MetadataRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .collect()
    }

    /// Converts a failed batch into [`ImgtagError::BatchFailed`].
    pub fn status(&self) -> Result<(), ImgtagError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ImgtagError::BatchFailed {
                failed: self.failed_count(),
                total: self.total(),
            })
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failed_count();
        if failed == 0 {
            return writeln!(f, "Processed {} file(s) without errors", self.total());
        }

        writeln!(
            f,
            "Processed {} file(s), {} failed:",
            self.total(),
            failed
        )?;
        for (identifier, err) in self.failures() {
            writeln!(f, "  {}: {}", identifier, err)?;
        }
        Ok(())
    }
}
