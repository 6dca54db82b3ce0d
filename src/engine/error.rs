use thiserror::Error;

/// Failure taxonomy of the derivation engine. Handlers map these to HTTP
/// responses; nothing here is retried internally.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
