// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::core::xml::XmlError;

/// Run-level failures. Anything here stops the run; record-level problems
/// are warnings (see `diag`).
#[derive(Debug, Error)]
pub enum Error {
    /// A yearly document is not XML at all.
    #[error("resolution document for {year} is not valid XML: {source}")]
    Xml {
        year: i32,
        #[source]
        source: XmlError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("{url} returned a body that is not UTF-8: {source}")]
    Encoding {
        url: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[cfg(feature = "fetch")]
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("year range {from}..={to} is empty or outside the years the feed covers")]
    YearRange { from: i32, to: i32 },

    /// Built without the `fetch` feature; only stored pages can be read.
    #[error("this build cannot download pages; use --from <dir>")]
    FetchDisabled,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
