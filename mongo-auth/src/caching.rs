use std::{collections::HashSet, fmt, sync::Arc};

use mongo_auth_wire::protocol::Transport;

use crate::{
    auth::Authenticator,
    cache::AuthenticatedDatabases,
    config::AuthenticatorConfig,
    credential::CredentialStore,
    error::AuthenticationError,
};

mod all;

pub use crate::caching::all::AuthenticateAll;

/// Authenticates a connection against every database of a credential store,
/// remembering which databases are already done.
///
/// Each [`authenticate_all`](Self::authenticate_all) call only runs the
/// handshakes of databases not authenticated yet, so the store can grow
/// between calls. Handshakes of a call are issued one at a time, and the first
/// failure aborts the call; databases authenticated before it stay so.
pub struct CachingAuthenticator {
    credentials: Arc<dyn CredentialStore>,
    connection: Arc<dyn Transport>,
    config: Arc<AuthenticatorConfig>,
    authenticated: AuthenticatedDatabases,
}

impl fmt::Debug for CachingAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CachingAuthenticator")
            .field("connection", &self.connection)
            .field("authenticated", &self.authenticated.all_authenticated())
            .finish()
    }
}

impl CachingAuthenticator {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        connection: Arc<dyn Transport>,
        config: Arc<AuthenticatorConfig>,
    ) -> Self {
        Self {
            credentials,
            connection,
            config,
            authenticated: AuthenticatedDatabases::new(),
        }
    }

    pub fn connection(&self) -> &Arc<dyn Transport> {
        &self.connection
    }

    pub fn is_authenticated(&self, database: &str) -> bool {
        self.authenticated.is_authenticated(database)
    }

    pub fn authenticated_databases(&self) -> Arc<HashSet<String>> {
        self.authenticated.all_authenticated()
    }

    /// Databases of the credential store not authenticated on this connection yet.
    pub fn missing_databases(&self) -> Vec<String> {
        self.authenticated.missing(self.credentials.databases())
    }

    /// Runs the missing handshakes, blocking the calling thread.
    pub fn authenticate_all(&self) -> Result<(), AuthenticationError> {
        let missing = self.missing_databases();
        #[cfg(feature = "tracing")]
        if missing.is_empty() {
            tracing::trace!(connection = ?self.connection, "all databases already authenticated");
        }
        for database in missing {
            // a concurrent call may have completed it meanwhile
            if self.is_authenticated(&database) {
                continue;
            }
            let result = self
                .authenticator(&database)
                .and_then(|auth| auth.authenticate());
            self.complete(&database, result)?;
        }
        Ok(())
    }

    /// Runs the missing handshakes without blocking.
    ///
    /// The returned future resolves once all of them succeeded or at the
    /// first failure. The set of databases is fixed when this method is called.
    pub fn authenticate_all_async(&self) -> AuthenticateAll<'_> {
        AuthenticateAll::new(self, self.missing_databases())
    }

    fn authenticator(&self, database: &str) -> Result<Authenticator, AuthenticationError> {
        let credential = self
            .credentials
            .get(database)
            .ok_or_else(|| AuthenticationError::MissingCredential(database.into()))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            database,
            user = credential.user_name(),
            mechanism = credential.mechanism(),
            "authenticating"
        );
        Authenticator::select(credential, self.connection.clone(), &self.config)
    }

    fn complete(
        &self,
        database: &str,
        result: Result<(), AuthenticationError>,
    ) -> Result<(), AuthenticationError> {
        match result {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(database, "authenticated");
                self.authenticated.mark_authenticated(database);
                Ok(())
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(database, %error, "authentication failed");
                Err(error)
            }
        }
    }
}
