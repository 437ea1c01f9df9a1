//! Top-level error type tying the per-layer errors together for `main`.

use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::io::SinkError;
use crate::providers::ProviderInitError;
use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ProviderInit(#[from] ProviderInitError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
