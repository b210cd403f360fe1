pub use mongo_auth_wire as wire;

pub use crate::{
    auth::Authenticator,
    cache::AuthenticatedDatabases,
    caching::CachingAuthenticator,
    config::AuthenticatorConfig,
    credential::{Credential, CredentialStore, CredentialsStore},
    error::AuthenticationError,
};
