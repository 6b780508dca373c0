#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("ingestion error: {0}")]
    Ingest(#[source] anyhow::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn ingest(err: impl Into<anyhow::Error>) -> Self {
        Self::Ingest(err.into())
    }
}
