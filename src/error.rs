use thiserror::Error;

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{}", INVALID_URL_MESSAGE)]
    Validation,
    #[error("{detail}")]
    Network { status: Option<u16>, detail: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Protocol(String),
    #[error("{0}")]
    DownloadFailure(String),
    #[error("{0}")]
    Save(String),
}

impl FlowError {
    pub fn kind(&self) -> &'static str {
        match self {
            FlowError::Validation => "validation",
            FlowError::Network { .. } => "network",
            FlowError::Server { .. } => "server",
            FlowError::Protocol(_) => "protocol",
            FlowError::DownloadFailure(_) => "download",
            FlowError::Save(_) => "save",
        }
    }
}

impl From<reqwest::Error> for FlowError {
    fn from(e: reqwest::Error) -> Self {
        FlowError::Network {
            status: None,
            detail: format!("Network error: {e}"),
        }
    }
}
