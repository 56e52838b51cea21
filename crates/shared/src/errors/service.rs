use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        match (error.status(), error.url()) {
            (Some(status), Some(url)) => ServiceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => ServiceError::Transport(error.to_string()),
        }
    }
}
