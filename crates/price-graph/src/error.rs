// File: crates/price-graph/src/error.rs
// Summary: Error taxonomy shared by every pipeline stage.

/// Failures surfaced to the host.
///
/// Per-point parse problems never show up here; they are dropped and counted
/// by the normalizer instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or unusable price data.
    #[error("data source error: {0}")]
    DataSource(String),
    /// Unknown theme, invalid override, or options that contradict each other.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Drawing failed or a numeric option cannot be used.
    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    pub(crate) fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Configuration(format!("invalid json: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
