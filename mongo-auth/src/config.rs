use std::sync::Arc;

use mongo_auth_wire::protocol::auth::SaslClient;

use crate::{credential::Credential, error::BoxedError};

pub const DEFAULT_GSSAPI_SERVICE_NAME: &str = "mongodb";

#[derive(derivative::Derivative)]
#[derivative(Debug)]
#[non_exhaustive]
pub struct AuthenticatorConfig {
    #[derivative(Debug = "ignore")]
    pub gssapi_provider: Option<Arc<dyn GssapiProvider>>,
    pub gssapi_service_name: String,
}

impl Default for AuthenticatorConfig {
    fn default() -> Self {
        Self {
            gssapi_provider: None,
            gssapi_service_name: DEFAULT_GSSAPI_SERVICE_NAME.into(),
        }
    }
}

impl AuthenticatorConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn gssapi_provider(mut self, provider: impl GssapiProvider + 'static) -> Self {
        self.gssapi_provider = Some(Arc::new(provider));
        self
    }

    pub fn gssapi_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.gssapi_service_name = service_name.into();
        self
    }
}

/// Creates the SASL client holding the delegated ticket of a GSSAPI credential.
pub trait GssapiProvider: Send + Sync {
    fn sasl_client(
        &self,
        credential: &Credential,
        service_name: &str,
        host: &str,
    ) -> Result<Box<dyn SaslClient>, BoxedError>;
}

impl<F> GssapiProvider for F
where
    F: Send + Sync + Fn(&Credential, &str, &str) -> Result<Box<dyn SaslClient>, BoxedError>,
{
    fn sasl_client(
        &self,
        credential: &Credential,
        service_name: &str,
        host: &str,
    ) -> Result<Box<dyn SaslClient>, BoxedError> {
        self(credential, service_name, host)
    }
}
