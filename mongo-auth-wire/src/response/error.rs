/// Command failure reported by the server (`ok: 0`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct ServerError {
    pub code: i32,
    pub message: String,
}

impl ServerError {
    pub const AUTHENTICATION_FAILED: i32 = 18;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn authentication_failed() -> Self {
        Self::new(Self::AUTHENTICATION_FAILED, "auth failed")
    }
}
