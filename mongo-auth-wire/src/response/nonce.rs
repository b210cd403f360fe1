#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Nonce {
    pub nonce: String,
}

impl Nonce {
    pub fn new(nonce: impl Into<String>) -> Self {
        Self {
            nonce: nonce.into(),
        }
    }
}
