use thiserror::Error;

/// The site data document could not be turned into records
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid site data JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("site data must be a JSON array, found {0}")]
    NotAnArray(&'static str),
}

/// Failure to read the site data document in a native build
#[cfg(feature = "native")]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch site data: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Invalid engine configuration
#[derive(Debug, Error)]
#[error("invalid engine config: {0}")]
pub struct ConfigError(#[from] pub serde_json::Error);
