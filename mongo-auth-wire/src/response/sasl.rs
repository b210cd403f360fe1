#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SaslReply {
    pub conversation_id: i32,
    pub done: bool,
    pub payload: Vec<u8>,
}

impl SaslReply {
    pub fn new(conversation_id: i32, done: bool, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            conversation_id,
            done,
            payload: payload.into(),
        }
    }
}
