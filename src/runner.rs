// src/runner.rs
use std::path::PathBuf;

use log::{debug, info};

use crate::{
    config::options::{PageSource, RunOptions},
    diag::Diagnostics,
    error::{Error, Result},
    export, file, merge, scrape,
    store::{self, PageKind, YearPage},
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub resolutions: usize,
    pub agenda_pages: usize,
    pub out_path: PathBuf,
}

/// Top-level pipeline: pages in, one export file out.
///
/// 1. fetch or load the yearly resolution documents (and agenda pages)
/// 2. optionally keep the raw pages for offline replays
/// 3. extract records, join agendas, write the table
pub fn run(opts: &RunOptions, diag: &mut dyn Diagnostics) -> Result<RunSummary> {
    let years = opts.years;
    if !years.is_supported() {
        return Err(Error::YearRange { from: years.from, to: years.to });
    }

    let (resolution_pages, agenda_pages) = load_sources(opts, diag)?;

    if let Some(dir) = &opts.save_raw {
        store::save_pages(dir, PageKind::Resolutions, &resolution_pages)?;
        if !agenda_pages.is_empty() {
            store::save_pages(dir, PageKind::Agendas, &agenda_pages)?;
        }
        info!("Saved raw pages to {}", dir.display());
    }

    let mut records = scrape::handle_xml_documents(&resolution_pages, diag)?;

    if opts.skip_agendas {
        debug!("Agenda join skipped");
    } else {
        let agendas = scrape::collect_agendas(&agenda_pages, diag);
        merge::attach_agendas(&mut records, &agendas, diag);
    }

    let data = export::to_dataset(&records);
    let out_path = file::write_export(&opts.export, &data)?;
    info!("Wrote {} rows to {}", data.rows.len(), out_path.display());

    Ok(RunSummary {
        documents: resolution_pages.len(),
        resolutions: records.len(),
        agenda_pages: agenda_pages.len(),
        out_path,
    })
}

type Sources = (Vec<YearPage>, Vec<YearPage>);

fn load_sources(opts: &RunOptions, diag: &mut dyn Diagnostics) -> Result<Sources> {
    match &opts.source {
        PageSource::Store(dir) => {
            let in_range = |pages: Vec<YearPage>| -> Vec<YearPage> {
                pages.into_iter().filter(|p| opts.years.contains(p.year)).collect()
            };
            let resolutions = in_range(store::load_pages(dir, PageKind::Resolutions)?);
            let agendas = if opts.skip_agendas {
                Vec::new()
            } else {
                in_range(store::load_pages(dir, PageKind::Agendas)?)
            };
            info!(
                "Loaded {} resolution and {} agenda pages from {}",
                resolutions.len(),
                agendas.len(),
                dir.display()
            );
            Ok((resolutions, agendas))
        }
        PageSource::Fetch => fetch_sources(opts, diag),
    }
}

#[cfg(feature = "fetch")]
fn fetch_sources(opts: &RunOptions, diag: &mut dyn Diagnostics) -> Result<Sources> {
    let fetcher = crate::core::net::Fetcher::new(opts.retry.pause, opts.retry.max_attempts)?;
    let resolutions = scrape::fetch_resolution_pages(&fetcher, &opts.years, diag)?;
    let agendas = if opts.skip_agendas {
        Vec::new()
    } else {
        scrape::fetch_agenda_pages(&fetcher, &opts.years, diag)?
    };
    Ok((resolutions, agendas))
}

#[cfg(not(feature = "fetch"))]
fn fetch_sources(_opts: &RunOptions, _diag: &mut dyn Diagnostics) -> Result<Sources> {
    Err(Error::FetchDisabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::YearRange;
    use crate::diag::NullDiagnostics;

    #[test]
    fn empty_year_range_is_rejected() {
        let opts = RunOptions {
            years: YearRange { from: 2000, to: 1999 },
            ..RunOptions::default()
        };
        let err = run(&opts, &mut NullDiagnostics).unwrap_err();
        assert!(matches!(err, Error::YearRange { from: 2000, to: 1999 }));
    }

    #[test]
    fn years_outside_the_feed_are_rejected_before_any_work() {
        for (from, to) in [(i32::MIN, i32::MAX), (1900, 1950), (1946, 9999)] {
            let opts = RunOptions { years: YearRange { from, to }, ..RunOptions::default() };
            let err = run(&opts, &mut NullDiagnostics).unwrap_err();
            assert!(matches!(err, Error::YearRange { .. }), "{from}..={to}: {err}");
        }
    }
}
