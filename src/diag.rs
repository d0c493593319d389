// src/diag.rs
//! Record-level problems that do not stop a run.
//!
//! Extractors never log these ambiently; they hand them to a `Diagnostics`
//! sink passed in by the caller. The CLI forwards them to the logger, tests
//! collect them into a `Vec<Warning>`.

use thiserror::Error;

use crate::model::TallyCheck;
use crate::specs::ExtractError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A record is missing a required field; it was skipped.
    #[error("skipped record {index} of document {year}: {error}")]
    MalformedRecord { year: i32, index: usize, error: ExtractError },

    /// The tally still disagrees with field 996 after the unanimous retry.
    /// The second-pass tally was kept; worth a manual look.
    #[error("discrepancy between calculated votes and XML data in {resolution} persists after unanimous retry ({check})")]
    ValidationMismatch { resolution: String, check: TallyCheck },

    /// No agenda text for this resolution.
    #[error("agenda mismatch in resolution {resolution}, probably an off-by-one error")]
    JoinKeyMissing { resolution: String },

    /// An agenda table row could not be turned into a (resolution, agenda) pair.
    #[error("skipped agenda row {row} for {year}: {reason}")]
    AgendaRowSkipped { year: i32, row: usize, reason: &'static str },
}

/// Sink for warnings and human-readable status lines.
pub trait Diagnostics {
    fn warn(&mut self, warning: Warning);

    /// Free-form progress line ("Parsing data record 3 of 80...").
    fn status(&mut self, _msg: &str) {}
}

/// Forwards everything to the `log` facade.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
    }

    fn status(&mut self, msg: &str) {
        log::info!("{msg}");
    }
}

/// Drops everything.
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn warn(&mut self, _warning: Warning) {}
}

impl Diagnostics for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Forwards to the logger and keeps a count per kind, for the run summary.
#[derive(Debug, Default)]
pub struct CountingDiagnostics {
    pub malformed: usize,
    pub mismatched: usize,
    pub missing_agenda: usize,
    pub skipped_rows: usize,
}

impl CountingDiagnostics {
    pub fn total(&self) -> usize {
        self.malformed + self.mismatched + self.missing_agenda + self.skipped_rows
    }
}

impl Diagnostics for CountingDiagnostics {
    fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::MalformedRecord { .. } => self.malformed += 1,
            Warning::ValidationMismatch { .. } => self.mismatched += 1,
            Warning::JoinKeyMissing { .. } => self.missing_agenda += 1,
            Warning::AgendaRowSkipped { .. } => self.skipped_rows += 1,
        }
        LogDiagnostics.warn(warning);
    }

    fn status(&mut self, msg: &str) {
        LogDiagnostics.status(msg);
    }
}
