use std::result::Result as StdResult;

use crate::response::{nonce::Nonce, sasl::SaslReply};

pub mod error;
pub mod nonce;
pub mod sasl;

pub use crate::response::error::ServerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: ReplyBody,
}

impl Reply {
    pub fn ok(self) -> StdResult<ReplyBody, Box<ServerError>> {
        match self.body {
            ReplyBody::Error(error) => Err(Box::new(error)),
            body => Ok(body),
        }
    }
}

impl From<ReplyBody> for Reply {
    fn from(value: ReplyBody) -> Self {
        Self { body: value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplyBody {
    Ok,
    Nonce(Nonce),
    Sasl(SaslReply),
    Error(ServerError),
}
