#![warn(missing_debug_implementations)]

pub mod error;
#[cfg(feature = "protocol")]
pub mod protocol;
pub mod request;
pub mod response;

/// Database receiving the commands of externally delegated mechanisms.
pub const EXTERNAL_DATABASE: &str = "$external";

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[non_exhaustive]
pub enum AuthenticationMechanism {
    #[strum(serialize = "MONGODB-CR")]
    MongodbCr,
    #[strum(serialize = "GSSAPI")]
    Gssapi,
}

impl AuthenticationMechanism {
    pub fn name(self) -> &'static str {
        self.into()
    }
}
