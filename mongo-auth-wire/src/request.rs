use crate::request::{
    auth::Authenticate,
    sasl::{SaslContinue, SaslStart},
};

pub mod auth;
pub mod sasl;

/// Authentication command, executed against a database by the transport.
///
/// Encoding is left to the transport; commands only carry their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    GetNonce,
    Authenticate(Authenticate),
    SaslStart(SaslStart),
    SaslContinue(SaslContinue),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetNonce => "getnonce",
            Self::Authenticate(_) => "authenticate",
            Self::SaslStart(_) => "saslStart",
            Self::SaslContinue(_) => "saslContinue",
        }
    }
}

impl From<Authenticate> for Command {
    fn from(value: Authenticate) -> Self {
        Self::Authenticate(value)
    }
}

impl From<SaslStart> for Command {
    fn from(value: SaslStart) -> Self {
        Self::SaslStart(value)
    }
}

impl From<SaslContinue> for Command {
    fn from(value: SaslContinue) -> Self {
        Self::SaslContinue(value)
    }
}
