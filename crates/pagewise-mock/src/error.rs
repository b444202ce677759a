use thiserror::Error;

/// Errors raised while preparing mock data.
#[derive(Debug, Error)]
pub enum MockError {
    /// A fixture did not have the `{"<collection>": [records...]}` shape.
    #[error("invalid fixture: {0}")]
    Fixture(String),

    /// A fixture could not be parsed as JSON.
    #[error("invalid fixture json: {0}")]
    Json(#[from] serde_json::Error),
}
