// src/store.rs
// Raw yearly pages on disk, so a run can be replayed without the network.
//
// Layout:
//   <dir>/resolutions/<year>.xml
//   <dir>/agendas/<year>.html

use std::{fs, path::{Path, PathBuf}};

use log::debug;

use crate::error::{Error, Result};
use crate::file::ensure_directory;

/// One downloaded document for one calendar year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPage {
    pub year: i32,
    pub body: String,
}

/// Export table: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Resolutions,
    Agendas,
}

impl PageKind {
    pub fn subdir(&self) -> &'static str {
        match self { PageKind::Resolutions => "resolutions", PageKind::Agendas => "agendas" }
    }
    pub fn ext(&self) -> &'static str {
        match self { PageKind::Resolutions => "xml", PageKind::Agendas => "html" }
    }
}

fn page_path(dir: &Path, kind: PageKind, year: i32) -> PathBuf {
    dir.join(kind.subdir()).join(format!("{year}.{}", kind.ext()))
}

pub fn save_pages(dir: &Path, kind: PageKind, pages: &[YearPage]) -> Result<Vec<PathBuf>> {
    let sub = dir.join(kind.subdir());
    ensure_directory(&sub)?;

    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let path = page_path(dir, kind, page.year);
        fs::write(&path, &page.body).map_err(|e| Error::io(&path, e))?;
        written.push(path);
    }
    debug!("Saved {} {} pages to {}", written.len(), kind.subdir(), sub.display());
    Ok(written)
}

/// Load every `<year>.<ext>` page of `kind`, sorted by year. Files that do
/// not follow the naming scheme are ignored. A missing directory is an empty
/// store, not an error.
pub fn load_pages(dir: &Path, kind: PageKind) -> Result<Vec<YearPage>> {
    let sub = dir.join(kind.subdir());
    if !sub.exists() {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in fs::read_dir(&sub).map_err(|e| Error::io(&sub, e))? {
        let path = entry.map_err(|e| Error::io(&sub, e))?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some(kind.ext()) { continue; }
        let Some(year) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<i32>().ok())
        else {
            continue;
        };

        let body = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        pages.push(YearPage { year, body });
    }
    pages.sort_by_key(|p| p.year);
    Ok(pages)
}
