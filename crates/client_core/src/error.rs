use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid article collection url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api rejected request: {0}")]
    Api(#[from] ApiException),
    #[error("{operation} response carried no data")]
    MissingData { operation: &'static str },
}

impl ClientError {
    /// HTTP status for failures the server answered; `None` for local or transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(err) => Some(err.status),
            ClientError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api(err) => Some(err.code),
            _ => None,
        }
    }
}
