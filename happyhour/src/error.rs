use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("no API key configured (set GOOGLE_MAPS_API_KEY)")]
    MissingApiKey,
    #[error("request denied: {0}")]
    RequestDenied(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("over query limit")]
    OverQueryLimit,
    #[error("unexpected provider status {0}")]
    UnexpectedStatus(String),
    #[error("provider responded with HTTP {0}")]
    HttpStatus(u16),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlacesResult<T> = Result<T, PlacesError>;
