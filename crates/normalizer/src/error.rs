use std::path::PathBuf;

/// Document-level failures. Field-level problems never surface here; they are
/// folded into null values while the record is assembled.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("issue source {} is unreadable: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: SourceFault,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum SourceFault {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of issues, found {0}")]
    NotAnArray(&'static str),
}

impl IngestError {
    pub fn unreadable(path: impl Into<PathBuf>, source: impl Into<SourceFault>) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            source: source.into(),
        }
    }
}
