use thiserror::Error;

/// Errors raised while talking to the music catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Artist {0} not found")]
    ArtistNotFound(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Saved-status lookup returned {got} flags for {expected} albums")]
    SavedStatusMismatch { expected: usize, got: usize },
}

impl From<ureq::Error> for CatalogError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                CatalogError::Api(code, body)
            }
            ureq::Error::Transport(transport) => CatalogError::Http(transport.to_string()),
        }
    }
}

/// Errors raised when a pool cannot be sampled as given
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Pool has {tracks} tracks but {weights} weights")]
    LengthMismatch { tracks: usize, weights: usize },

    #[error("Weights sum to {0}, expected 1.0")]
    NotNormalized(f64),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
}
