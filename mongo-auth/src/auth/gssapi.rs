use std::sync::Arc;

use mongo_auth_wire::{
    protocol::{
        auth::{converse, converse_async, Conversation, SaslClient},
        Transport,
    },
    request::{
        sasl::{SaslContinue, SaslStart},
        Command,
    },
    response::ReplyBody,
    AuthenticationMechanism, EXTERNAL_DATABASE,
};

use crate::{
    config::{AuthenticatorConfig, GssapiProvider},
    credential::Credential,
    error::AuthenticationError,
};

#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct GssapiAuthenticator {
    credential: Arc<Credential>,
    connection: Arc<dyn Transport>,
    #[derivative(Debug = "ignore")]
    provider: Arc<dyn GssapiProvider>,
    service_name: String,
}

impl GssapiAuthenticator {
    pub fn new(
        credential: Arc<Credential>,
        connection: Arc<dyn Transport>,
        config: &AuthenticatorConfig,
    ) -> Result<Self, AuthenticationError> {
        let provider = config
            .gssapi_provider
            .clone()
            .ok_or(AuthenticationError::GssapiUnavailable)?;
        Ok(Self {
            credential,
            connection,
            provider,
            service_name: config.gssapi_service_name.clone(),
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn authenticate(&self) -> Result<(), AuthenticationError> {
        converse(self.connection.as_ref(), self.conversation()?)
    }

    pub async fn authenticate_async(&self) -> Result<(), AuthenticationError> {
        converse_async(self.connection.as_ref(), self.conversation()?).await
    }

    fn conversation(&self) -> Result<GssapiConversation, AuthenticationError> {
        let client = self
            .provider
            .sasl_client(
                &self.credential,
                &self.service_name,
                self.connection.host(),
            )
            .map_err(AuthenticationError::Sasl)?;
        Ok(GssapiConversation { client })
    }
}

#[derive(Debug)]
struct GssapiConversation {
    client: Box<dyn SaslClient>,
}

impl Conversation for GssapiConversation {
    fn database(&self) -> &str {
        EXTERNAL_DATABASE
    }

    fn start(&mut self) -> Result<Command, AuthenticationError> {
        let payload = self
            .client
            .initial_response()
            .map_err(AuthenticationError::Sasl)?;
        Ok(SaslStart {
            mechanism: AuthenticationMechanism::Gssapi,
            payload,
        }
        .into())
    }

    fn step(&mut self, reply: ReplyBody) -> Result<Option<Command>, AuthenticationError> {
        let reply = match reply {
            ReplyBody::Sasl(reply) => reply,
            other => return Err(AuthenticationError::UnexpectedReply(other)),
        };
        if reply.done {
            return Ok(None);
        }
        let payload = self
            .client
            .evaluate_challenge(&reply.payload)
            .map_err(AuthenticationError::Sasl)?;
        Ok(Some(
            SaslContinue {
                conversation_id: reply.conversation_id,
                payload,
            }
            .into(),
        ))
    }
}
