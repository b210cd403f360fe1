use crate::AuthenticationMechanism;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaslStart {
    pub mechanism: AuthenticationMechanism,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaslContinue {
    pub conversation_id: i32,
    pub payload: Vec<u8>,
}
