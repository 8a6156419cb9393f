use thiserror::Error;

/// Every way a generation or verification run can fail.
///
/// All variants are fatal: the generator never emits a partial document.
#[derive(Debug, Error)]
pub enum VectorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("cannot encode {value} as a WAD")]
    Encoding { value: String },

    #[error("oracle returned {value} for {regime} case {index}")]
    Oracle {
        regime: &'static str,
        index: usize,
        value: f64,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("verification failed: {violations} violation(s)")]
    Verify { violations: usize },
}

pub type Result<T> = std::result::Result<T, VectorError>;
