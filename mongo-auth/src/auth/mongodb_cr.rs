use std::sync::Arc;

use md5::{Digest, Md5};
use mongo_auth_wire::{
    protocol::{
        auth::{converse, converse_async, Conversation},
        Transport,
    },
    request::{auth::Authenticate, Command},
    response::ReplyBody,
    AuthenticationMechanism,
};

use crate::{credential::Credential, error::AuthenticationError};

/// `md5hex(user + ":mongo:" + password)`, the digest stored by the server.
pub fn password_digest(user_name: &str, password: &str) -> String {
    format!("{:x}", Md5::digest(format!("{user_name}:mongo:{password}")))
}

/// `md5hex(nonce + user + password_digest)`, the proof sent in `authenticate`.
pub fn authentication_key(user_name: &str, password: &str, nonce: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(nonce);
    hasher.update(user_name);
    hasher.update(password_digest(user_name, password));
    format!("{:x}", hasher.finalize())
}

#[derive(Debug)]
pub struct MongodbCrAuthenticator {
    credential: Arc<Credential>,
    connection: Arc<dyn Transport>,
}

impl MongodbCrAuthenticator {
    pub fn new(
        credential: Arc<Credential>,
        connection: Arc<dyn Transport>,
    ) -> Result<Self, AuthenticationError> {
        if credential.password().is_none() {
            return Err(AuthenticationError::MissingPassword(
                AuthenticationMechanism::MongodbCr.name(),
            ));
        }
        Ok(Self {
            credential,
            connection,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn authenticate(&self) -> Result<(), AuthenticationError> {
        converse(self.connection.as_ref(), self.conversation())
    }

    pub async fn authenticate_async(&self) -> Result<(), AuthenticationError> {
        converse_async(self.connection.as_ref(), self.conversation()).await
    }

    fn conversation(&self) -> MongodbCrConversation<'_> {
        MongodbCrConversation {
            credential: &self.credential,
            awaiting_nonce: true,
        }
    }
}

#[derive(Debug)]
struct MongodbCrConversation<'a> {
    credential: &'a Credential,
    awaiting_nonce: bool,
}

impl Conversation for MongodbCrConversation<'_> {
    fn database(&self) -> &str {
        self.credential.source()
    }

    fn start(&mut self) -> Result<Command, AuthenticationError> {
        self.awaiting_nonce = true;
        Ok(Command::GetNonce)
    }

    fn step(&mut self, reply: ReplyBody) -> Result<Option<Command>, AuthenticationError> {
        match reply {
            ReplyBody::Nonce(reply) if self.awaiting_nonce => {
                self.awaiting_nonce = false;
                let user = self.credential.user_name();
                // checked on construction
                let password = self.credential.password().unwrap_or_default();
                Ok(Some(
                    Authenticate {
                        user: user.into(),
                        key: authentication_key(user, password, &reply.nonce),
                        nonce: reply.nonce,
                    }
                    .into(),
                ))
            }
            ReplyBody::Ok if !self.awaiting_nonce => Ok(None),
            other => Err(AuthenticationError::UnexpectedReply(other)),
        }
    }
}
