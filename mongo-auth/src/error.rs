#[rustfmt::skip]
pub use mongo_auth_wire::error::*;

#[derive(Debug, thiserror::Error)]
#[error("A credential is already registered for database {0}")]
pub struct DuplicateCredential(pub String);
