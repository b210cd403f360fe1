use std::sync::Arc;

use mongo_auth_wire::{protocol::Transport, AuthenticationMechanism};

use crate::{
    auth::{gssapi::GssapiAuthenticator, mongodb_cr::MongodbCrAuthenticator},
    config::AuthenticatorConfig,
    credential::Credential,
    error::AuthenticationError,
};

pub mod gssapi;
pub mod mongodb_cr;

/// Handshake of one credential on one connection.
#[derive(Debug)]
#[non_exhaustive]
pub enum Authenticator {
    MongodbCr(MongodbCrAuthenticator),
    Gssapi(GssapiAuthenticator),
}

impl Authenticator {
    /// Picks the handshake matching the credential mechanism.
    ///
    /// Errors are configuration errors, so they must not be retried.
    pub fn select(
        credential: Arc<Credential>,
        connection: Arc<dyn Transport>,
        config: &AuthenticatorConfig,
    ) -> Result<Self, AuthenticationError> {
        Ok(match credential.authentication_mechanism()? {
            AuthenticationMechanism::MongodbCr => {
                Self::MongodbCr(MongodbCrAuthenticator::new(credential, connection)?)
            }
            AuthenticationMechanism::Gssapi => {
                Self::Gssapi(GssapiAuthenticator::new(credential, connection, config)?)
            }
            mechanism => {
                return Err(AuthenticationError::UnsupportedMechanism(
                    mechanism.to_string(),
                ))
            }
        })
    }

    pub fn credential(&self) -> &Credential {
        match self {
            Self::MongodbCr(auth) => auth.credential(),
            Self::Gssapi(auth) => auth.credential(),
        }
    }

    pub fn authenticate(&self) -> Result<(), AuthenticationError> {
        match self {
            Self::MongodbCr(auth) => auth.authenticate(),
            Self::Gssapi(auth) => auth.authenticate(),
        }
    }

    pub async fn authenticate_async(&self) -> Result<(), AuthenticationError> {
        match self {
            Self::MongodbCr(auth) => auth.authenticate_async().await,
            Self::Gssapi(auth) => auth.authenticate_async().await,
        }
    }
}
