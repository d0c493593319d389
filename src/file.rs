// src/file.rs

use std::{fs, path::{Path, PathBuf}};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::error::{Error, Result};
use crate::store::DataSet;

/// Write the export table to the path and format in `export`.
/// Parent directories are created. Returns the path written to.
pub fn write_export(export: &ExportOptions, data: &DataSet) -> Result<PathBuf> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(&data.headers, &data.rows, export.format.delim());
    fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}
