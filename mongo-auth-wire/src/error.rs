use std::io;

use crate::response::{ReplyBody, ServerError};

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[error("{error} (database {database})")]
pub struct RejectedError {
    pub database: String,
    pub error: ServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Unsupported authentication mechanism {0}")]
    UnsupportedMechanism(String),
    #[error("No credential registered for database {0}")]
    MissingCredential(String),
    #[error("Mechanism {0} requires a password")]
    MissingPassword(&'static str),
    #[error("No GSSAPI provider configured")]
    GssapiUnavailable,
    #[error("Authentication rejected: {0}")]
    Rejected(#[from] Box<RejectedError>),
    #[error("Unexpected reply {0:?}")]
    UnexpectedReply(ReplyBody),
    #[error("SASL error: {0}")]
    Sasl(BoxedError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AuthenticationError {
    /// Configuration errors are never fixed by trying again.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedMechanism(_)
                | Self::MissingCredential(_)
                | Self::MissingPassword(_)
                | Self::GssapiUnavailable
        )
    }
}
