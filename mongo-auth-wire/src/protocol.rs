use std::{fmt, io};

use crate::{
    error::{AuthenticationError, RejectedError},
    request::Command,
    response::{Reply, ReplyBody},
};

pub mod auth;

/// Command channel of a single connection.
///
/// Implementations must not interleave the commands of concurrent callers on the wire.
#[async_trait::async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    /// Host name of the server, used to build service principals.
    fn host(&self) -> &str;

    fn execute(&self, database: &str, command: &Command) -> io::Result<Reply>;

    async fn execute_async(&self, database: &str, command: &Command) -> io::Result<Reply>;
}

fn rejected(database: &str, reply: Reply) -> Result<ReplyBody, AuthenticationError> {
    reply.ok().map_err(|error| {
        let database = database.into();
        Box::new(RejectedError {
            database,
            error: *error,
        })
        .into()
    })
}

pub fn execute(
    transport: &dyn Transport,
    database: &str,
    command: &Command,
) -> Result<ReplyBody, AuthenticationError> {
    rejected(database, transport.execute(database, command)?)
}

pub async fn execute_async(
    transport: &dyn Transport,
    database: &str,
    command: &Command,
) -> Result<ReplyBody, AuthenticationError> {
    rejected(database, transport.execute_async(database, command).await?)
}
