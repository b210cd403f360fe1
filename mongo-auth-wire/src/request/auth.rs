use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Authenticate {
    pub user: String,
    pub nonce: String,
    pub key: String,
}

impl fmt::Debug for Authenticate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Authenticate")
            .field("user", &self.user)
            .field("nonce", &self.nonce)
            .field("key", &"<redacted>")
            .finish()
    }
}
