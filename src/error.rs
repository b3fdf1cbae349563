//! Error taxonomy for the departure pipeline.
//!
//! Every variant aborts the run at the top level: there is no retry and no
//! partial report. A single failing feed source invalidates the whole output.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("reference stop data: {0}")]
    ReferenceData(String),

    #[error("feed fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("feed decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("invalid coordinate: {0}")]
    Validation(String),

    #[error("grouping invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
