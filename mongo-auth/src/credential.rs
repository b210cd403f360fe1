use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use mongo_auth_wire::{AuthenticationMechanism, EXTERNAL_DATABASE};

use crate::error::{AuthenticationError, DuplicateCredential};

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    mechanism: String,
    user_name: String,
    source: String,
    password: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("mechanism", &self.mechanism)
            .field("user_name", &self.user_name)
            .field("source", &self.source)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credential {
    pub fn new(
        mechanism: impl Into<String>,
        user_name: impl Into<String>,
        source: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            mechanism: mechanism.into(),
            user_name: user_name.into(),
            source: source.into(),
            password,
        }
    }

    pub fn mongodb_cr(
        user_name: impl Into<String>,
        source: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            AuthenticationMechanism::MongodbCr.name(),
            user_name,
            source,
            Some(password.into()),
        )
    }

    pub fn gssapi(user_name: impl Into<String>) -> Self {
        Self::new(
            AuthenticationMechanism::Gssapi.name(),
            user_name,
            EXTERNAL_DATABASE,
            None,
        )
    }

    pub fn mechanism(&self) -> &str {
        &self.mechanism
    }

    pub fn authentication_mechanism(&self) -> Result<AuthenticationMechanism, AuthenticationError> {
        self.mechanism
            .parse()
            .map_err(|_| AuthenticationError::UnsupportedMechanism(self.mechanism.clone()))
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Database the credential authenticates against.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Read-only view of the credentials a connection must satisfy.
pub trait CredentialStore: fmt::Debug + Send + Sync {
    fn get(&self, database: &str) -> Option<Arc<Credential>>;

    fn databases(&self) -> HashSet<String>;
}

/// In-memory store holding at most one credential per source database.
///
/// Credentials can be added while connections are in use; the next
/// authentication request of each connection picks them up.
#[derive(Debug, Default)]
pub struct CredentialsStore(RwLock<HashMap<String, Arc<Credential>>>);

impl CredentialsStore {
    pub fn new(
        credentials: impl IntoIterator<Item = Credential>,
    ) -> Result<Self, DuplicateCredential> {
        let store = Self::default();
        for credential in credentials {
            store.add(credential)?;
        }
        Ok(store)
    }

    pub fn add(&self, credential: Credential) -> Result<(), DuplicateCredential> {
        let mut credentials = self.0.write().unwrap_or_else(PoisonError::into_inner);
        if credentials.contains_key(credential.source()) {
            return Err(DuplicateCredential(credential.source));
        }
        credentials.insert(credential.source.clone(), Arc::new(credential));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for CredentialsStore {
    fn get(&self, database: &str) -> Option<Arc<Credential>> {
        let credentials = self.0.read().unwrap_or_else(PoisonError::into_inner);
        credentials.get(database).cloned()
    }

    fn databases(&self) -> HashSet<String> {
        let credentials = self.0.read().unwrap_or_else(PoisonError::into_inner);
        credentials.keys().cloned().collect()
    }
}
