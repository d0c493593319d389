// src/config/options.rs
use std::ffi::OsString;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Datelike;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub source: PageSource,
    pub years: YearRange,
    /// Also write the raw yearly pages here (for offline replays).
    pub save_raw: Option<PathBuf>,
    pub skip_agendas: bool,
    pub retry: RetryOptions,
    pub export: ExportOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            source: PageSource::Fetch,
            years: YearRange::default(),
            save_raw: None,
            skip_agendas: false,
            retry: RetryOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// Where the yearly pages come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageSource {
    Fetch,
    /// A directory previously filled by `store::save_pages`.
    Store(PathBuf),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    pub from: i32,
    pub to: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self { from: START_YEAR, to: current_year() }
    }
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        self.iter().contains(&year)
    }

    pub fn iter(&self) -> RangeInclusive<i32> {
        self.from..=self.to
    }

    pub fn len(&self) -> usize {
        let n = i64::from(self.to) - i64::from(self.from) + 1;
        usize::try_from(n.max(0)).unwrap_or(usize::MAX)
    }

    /// Non-empty and inside the years the feed can have data for
    /// (`START_YEAR` through next year).
    pub fn is_supported(&self) -> bool {
        !self.is_empty() && self.from >= START_YEAR && self.to <= current_year() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryOptions {
    pub pause: Duration,
    pub max_attempts: u32,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self { pause: Duration::from_secs(RETRY_PAUSE_SECS), max_attempts: MAX_ATTEMPTS }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the extension follows the format unless the
    /// user typed one.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = match &self.out_path.ext {
            Some(ext) => ext.as_str(),
            None => self.format.ext(),
        };
        path.push(join!(stem, ".", ext));
        path
    }

    /// Split user text into dir + stem (+ explicit extension).
    /// A trailing separator means "directory, default file name".
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            return;
        }
        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path = OutputPath { dir: PathBuf::from(s), ..OutputPath::default() };
            return;
        }

        let p = Path::new(s);
        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_string_lossy().into_owned());
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<String>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::new(),
            file_stem: OsString::from(DEFAULT_OUT_FILE),
            ext: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_follows_format() {
        let mut export = ExportOptions::default();
        assert_eq!(export.out_path(), PathBuf::from("voting.csv"));
        export.format = ExportFormat::Tsv;
        assert_eq!(export.out_path(), PathBuf::from("voting.tsv"));
    }

    #[test]
    fn user_extension_is_kept() {
        let mut export = ExportOptions::default();
        export.set_path("out/sc/votes.txt");
        export.format = ExportFormat::Tsv;
        assert_eq!(export.out_path(), Path::new("out/sc").join("votes.txt"));
    }

    #[test]
    fn trailing_separator_means_directory() {
        let mut export = ExportOptions::default();
        export.set_path("out/");
        assert_eq!(export.out_path(), Path::new("out/").join("voting.csv"));
    }

    #[test]
    fn year_range_len() {
        let r = YearRange { from: 1946, to: 1948 };
        assert_eq!(r.len(), 3);
        assert!(r.contains(1947));
        assert!(!r.contains(1949));
        assert!(YearRange { from: 2000, to: 1999 }.is_empty());
    }

    #[test]
    fn extreme_year_ranges_do_not_overflow() {
        let all = YearRange { from: i32::MIN, to: i32::MAX };
        assert!(all.len() >= u32::MAX as usize);
        assert!(!all.is_supported());
        assert!(YearRange { from: i32::MAX, to: i32::MIN }.is_empty());
    }

    #[test]
    fn supported_years_start_with_the_feed() {
        assert!(YearRange::default().is_supported());
        assert!(YearRange { from: START_YEAR, to: START_YEAR }.is_supported());
        assert!(!YearRange { from: 1900, to: 1950 }.is_supported());
        assert!(!YearRange { from: 1946, to: current_year() + 2 }.is_supported());
        assert!(!YearRange { from: 2000, to: 1999 }.is_supported());
    }
}
