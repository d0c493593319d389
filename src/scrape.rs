// src/scrape.rs
// Yearly documents in, typed records out. Network access lives in the
// `fetch_*` helpers; everything else works on pages already in memory.

use std::collections::HashMap;

use log::{debug, info};

use crate::{
    diag::{Diagnostics, Warning},
    error::{Error, Result},
    model::ResolutionRecord,
    record::{Record, parse_collection},
    specs::{self, ExtractError},
    store::YearPage,
};

#[cfg(feature = "fetch")]
use crate::{config::options::YearRange, core::net::Fetcher};

/// Parse every yearly resolution document and extract one
/// `ResolutionRecord` per well-formed record, in document order.
///
/// A document that is not XML stops the run. A record missing a required
/// field is skipped with `Warning::MalformedRecord`.
pub fn handle_xml_documents(
    pages: &[YearPage],
    diag: &mut dyn Diagnostics,
) -> Result<Vec<ResolutionRecord>> {
    let mut out = Vec::new();

    for page in pages {
        let records = parse_collection(&page.body)
            .map_err(|source| Error::Xml { year: page.year, source })?;
        debug!("Document {} holds {} records", page.year, records.len());

        let total = records.len();
        for (i, record) in records.iter().enumerate() {
            diag.status(&format!("Parsing data record {} of {}...", i + 1, total));

            match extract_record(record, diag) {
                Ok(r) => out.push(r),
                Err(error) => diag.warn(Warning::MalformedRecord { year: page.year, index: i, error }),
            }
        }
    }

    info!("Extracted {} resolutions from {} documents", out.len(), pages.len());
    Ok(out)
}

fn extract_record(
    record: &Record,
    diag: &mut dyn Diagnostics,
) -> std::result::Result<ResolutionRecord, ExtractError> {
    let metadata = specs::resolution::parse_metadata(record)?;
    let tally = specs::votes::extract_voting_data(record, &metadata.resolution, diag)?;
    Ok(ResolutionRecord::new(metadata, tally))
}

/// Resolution → agenda across all overview pages. Pages are applied in
/// order, so a later year overrides an earlier one on a duplicate symbol.
pub fn collect_agendas(pages: &[YearPage], diag: &mut dyn Diagnostics) -> HashMap<String, String> {
    let mut agendas = HashMap::new();
    for page in pages {
        let rows = specs::agendas::parse_agenda_page(page, diag);
        debug!("Agenda page {}: {} rows", page.year, rows.len());
        agendas.extend(rows);
    }
    agendas
}

/// Download the resolution feed for each year in `years`.
#[cfg(feature = "fetch")]
pub fn fetch_resolution_pages(
    fetcher: &Fetcher,
    years: &YearRange,
    diag: &mut dyn Diagnostics,
) -> Result<Vec<YearPage>> {
    let mut pages = Vec::with_capacity(years.len());
    for year in years.iter() {
        diag.status(&format!("Getting data for year {year}..."));
        let body = fetcher.get_text(&specs::resolution::feed_url(year))?;
        pages.push(YearPage { year, body });
    }
    Ok(pages)
}

/// Download the agenda overview page for each year. The plural URL is tried
/// first; years with a single resolution only answer on the singular form.
#[cfg(feature = "fetch")]
pub fn fetch_agenda_pages(
    fetcher: &Fetcher,
    years: &YearRange,
    diag: &mut dyn Diagnostics,
) -> Result<Vec<YearPage>> {
    let mut pages = Vec::with_capacity(years.len());
    for year in years.iter() {
        diag.status(&format!("Getting agenda data for year {year}..."));
        let body = match fetcher.get_text_or_missing(&specs::agendas::page_url(year, false))? {
            Some(body) => body,
            None => {
                debug!("No plural agenda page for {year}, trying singular");
                fetcher.get_text(&specs::agendas::page_url(year, true))?
            }
        };
        pages.push(YearPage { year, body });
    }
    Ok(pages)
}
