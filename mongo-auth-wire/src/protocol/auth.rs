use std::fmt;

use crate::{
    error::{AuthenticationError, BoxedError},
    protocol::{execute, execute_async, Transport},
    request::Command,
    response::ReplyBody,
};

/// Mechanism handshake, as a sequence of commands driven by server replies.
///
/// A conversation performs no IO by itself, so the same handshake runs on both
/// [`converse`] and [`converse_async`].
pub trait Conversation: fmt::Debug + Send {
    /// Database the commands are executed against.
    fn database(&self) -> &str;

    fn start(&mut self) -> Result<Command, AuthenticationError>;

    /// Returns `None` once the server has accepted the handshake.
    fn step(&mut self, reply: ReplyBody) -> Result<Option<Command>, AuthenticationError>;
}

/// Client side of a delegated SASL exchange (e.g. a Kerberos ticket context).
pub trait SaslClient: fmt::Debug + Send {
    fn initial_response(&mut self) -> Result<Vec<u8>, BoxedError>;

    fn evaluate_challenge(&mut self, challenge: &[u8]) -> Result<Vec<u8>, BoxedError>;
}

pub fn converse(
    transport: &dyn Transport,
    mut conversation: impl Conversation,
) -> Result<(), AuthenticationError> {
    let mut command = conversation.start()?;
    loop {
        let reply = execute(transport, conversation.database(), &command)?;
        match conversation.step(reply)? {
            Some(next) => command = next,
            None => return Ok(()),
        }
    }
}

pub async fn converse_async(
    transport: &dyn Transport,
    mut conversation: impl Conversation,
) -> Result<(), AuthenticationError> {
    // conversations are not `Sync`, so don't hold a borrow across await points
    let database = conversation.database().to_owned();
    let mut command = conversation.start()?;
    loop {
        let reply = execute_async(transport, &database, &command).await?;
        match conversation.step(reply)? {
            Some(next) => command = next,
            None => return Ok(()),
        }
    }
}
