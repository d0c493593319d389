// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use log::info;

use crate::config::consts::{MAX_ATTEMPTS, RETRY_PAUSE_SECS, START_YEAR};
use crate::config::options::{ExportFormat, PageSource, RunOptions, YearRange, current_year};
use crate::diag::CountingDiagnostics;

/// Security Council voting records as one spreadsheet row per resolution
#[derive(Parser, Debug)]
#[command(name = "unsc_votes", version)]
pub struct Args {
    /// Read previously saved pages from this directory instead of downloading
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    /// Also save the raw yearly pages to this directory
    #[arg(long, value_name = "DIR")]
    pub save_raw: Option<PathBuf>,

    /// First year to process
    #[arg(long, default_value_t = START_YEAR)]
    pub from_year: i32,

    /// Last year to process (default: current year)
    #[arg(long)]
    pub to_year: Option<i32>,

    /// Output file or directory (trailing separator)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Leave the Agenda column empty and skip the agenda pages
    #[arg(long)]
    pub skip_agendas: bool,

    /// Seconds to wait between retries of a failed request
    #[arg(long, default_value_t = RETRY_PAUSE_SECS)]
    pub pause: u64,

    /// Give up on a URL after this many attempts
    #[arg(long, default_value_t = MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Warnings and errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Args {
    pub fn to_options(&self) -> RunOptions {
        let mut opts = RunOptions {
            source: match &self.from {
                Some(dir) => PageSource::Store(dir.clone()),
                None => PageSource::Fetch,
            },
            years: YearRange { from: self.from_year, to: self.to_year.unwrap_or_else(current_year) },
            save_raw: self.save_raw.clone(),
            skip_agendas: self.skip_agendas,
            ..RunOptions::default()
        };
        opts.retry.pause = Duration::from_secs(self.pause);
        opts.retry.max_attempts = self.max_attempts;
        opts.export.format = self.format.into();
        if let Some(out) = &self.out {
            opts.export.set_path(out);
        }
        opts
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    crate::logging::init(args.verbose, args.quiet)?;

    let opts = args.to_options();
    let mut diag = CountingDiagnostics::default();
    let summary = crate::runner::run(&opts, &mut diag)
        .wrap_err_with(|| format!("run for {}..={} failed", opts.years.from, opts.years.to))?;

    info!(
        "Done: {} resolutions from {} documents -> {}",
        summary.resolutions,
        summary.documents,
        summary.out_path.display()
    );
    if diag.total() > 0 {
        info!(
            "{} warnings ({} malformed records, {} unresolved tallies, {} missing agendas, {} skipped agenda rows)",
            diag.total(),
            diag.malformed,
            diag.mismatched,
            diag.missing_agenda,
            diag.skipped_rows
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn flags_become_options() {
        let args = Args::try_parse_from([
            "unsc_votes", "--from", "cache", "--from-year", "1950", "--to-year", "1951",
            "-o", "out/votes", "--format", "tsv", "--skip-agendas", "--pause", "1",
        ])
        .unwrap();
        let opts = args.to_options();

        assert_eq!(opts.source, PageSource::Store(PathBuf::from("cache")));
        assert_eq!(opts.years, YearRange { from: 1950, to: 1951 });
        assert!(opts.skip_agendas);
        assert_eq!(opts.retry.pause, Duration::from_secs(1));
        assert_eq!(opts.export.out_path(), Path::new("out").join("votes.tsv"));
    }

    #[test]
    fn defaults_fetch_everything() {
        let opts = Args::try_parse_from(["unsc_votes"]).unwrap().to_options();
        assert_eq!(opts.source, PageSource::Fetch);
        assert_eq!(opts.years.from, START_YEAR);
        assert_eq!(opts.export.out_path(), PathBuf::from("voting.csv"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["unsc_votes", "-q", "-v"]).is_err());
    }
}
