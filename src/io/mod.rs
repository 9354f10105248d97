pub mod output;

use std::fs;
use std::path::Path;

use crate::core::errors::{Error, Result};
use crate::core::AssessmentExport;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Read and parse an export file, then check its counts are coherent.
pub fn load_export(path: &Path) -> Result<AssessmentExport> {
    let content = read_file(path)?;
    let export: AssessmentExport = serde_json::from_str(&content)?;
    export
        .validate()
        .map_err(|message| Error::export(path, message))?;
    Ok(export)
}
