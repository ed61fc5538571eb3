use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Error as kept in request state: whatever the server or transport said, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
}

impl From<&ClientError> for ErrorPayload {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Api { status, code, message } => ErrorPayload {
                status: Some(*status),
                code: Some(code.clone()),
                message: message.clone(),
            },
            ClientError::Transport(e) => ErrorPayload {
                status: e.status().map(|s| s.as_u16()),
                code: None,
                message: e.to_string(),
            },
            ClientError::Decode(msg) => ErrorPayload {
                status: None,
                code: None,
                message: msg.clone(),
            },
        }
    }
}
