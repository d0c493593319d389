//! # Page and record extractors
//!
//! Each module here knows where the ground truth lives in one source and how to read
//! it robustly:
//!
//! - `resolution` – resolution metadata from a MARCXML record (title, symbol,
//!   meeting record, vote date, draft symbol).
//! - `votes` – per-country votes from the repeated `967` fields, cross-checked
//!   against the independent total in `996`, with the unanimous-vote retry.
//! - `agendas` – `(resolution, agenda text)` pairs from the yearly HTML
//!   overview tables.
//!
//! ## What does **not** live here
//! - Fetching, caching or iteration over years (`scrape`, `store`).
//! - Joining and export formatting (`merge`, `export`).
//!
//! ## Conventions
//! - Absence is an `Option`; each module decides per field whether that is fatal
//!   (`ExtractError`) or benign.
//! - Record-level oddities that are not fatal go to the injected
//!   `diag::Diagnostics`, never to a global logger. `log::debug!` is fine for
//!   trace output.
//! - Pure functions: same input, same output. Specs are testable offline
//!   against captured documents.

use thiserror::Error;

pub mod agendas;
pub mod resolution;
pub mod votes;

/// A required field is missing from a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{field} missing (datafield {tag}, subfield {code}){}", in_resolution(.resolution))]
    MissingField {
        field: &'static str,
        tag: &'static str,
        code: &'static str,
        /// Known once the resolution symbol itself has been read.
        resolution: Option<String>,
    },
}

fn in_resolution(resolution: &Option<String>) -> String {
    match resolution {
        Some(r) => format!(" in {r}"),
        None => s!(),
    }
}
