// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod diag;
pub mod error;
pub mod export;
pub mod file;
pub mod merge;
pub mod model;
pub mod record;
pub mod runner;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub use error::{Error, Result};
