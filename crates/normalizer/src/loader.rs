use std::fs;
use std::path::{Path, PathBuf};

use common::config::AppConfig;
use serde_json::Value;
use tracing::info;

use crate::coerce::value_kind;
use crate::error::{IngestError, SourceFault};
use crate::table::IssueTable;
use crate::transform::normalize;

/// Reads the export and returns its top-level issue objects.
///
/// An empty array is a valid, empty source. Anything else that is not an
/// array is treated as unreadable.
pub fn load_raw_issues(path: impl AsRef<Path>) -> Result<Vec<Value>, IngestError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| IngestError::unreadable(path, err))?;
    let document: Value =
        serde_json::from_str(&contents).map_err(|err| IngestError::unreadable(path, err))?;
    match document {
        Value::Array(issues) => Ok(issues),
        other => Err(IngestError::unreadable(
            path,
            SourceFault::NotAnArray(value_kind(&other)),
        )),
    }
}

pub fn load_and_normalize(path: impl AsRef<Path>) -> Result<IssueTable, IngestError> {
    let path = path.as_ref();
    let raw = load_raw_issues(path)?;
    if raw.is_empty() {
        info!(path = %path.display(), "no issues found in source");
        return Ok(IssueTable::default());
    }

    let table = normalize(&raw);
    info!(
        path = %path.display(),
        raw = raw.len(),
        rows = table.len(),
        "issues normalized"
    );
    Ok(table)
}

/// Location of the issue export, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSource {
    path: PathBuf,
}

impl IssueSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.file_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<IssueTable, IngestError> {
        load_and_normalize(&self.path)
    }
}
