#![allow(unused)]
use std::{
    collections::HashSet,
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    thread,
    time::Duration,
};

use mongo_auth::{
    config::AuthenticatorConfig,
    credential::{Credential, CredentialsStore},
    error::BoxedError,
    wire::{
        protocol::{auth::SaslClient, Transport},
        request::Command,
        response::{nonce::Nonce, sasl::SaslReply, Reply, ReplyBody, ServerError},
        EXTERNAL_DATABASE,
    },
    CachingAuthenticator,
};

pub const NONCE: &str = "2375531c32080ae8";
pub const CONVERSATION_ID: i32 = 7;
pub const SASL_ROUNDS: usize = 2;

pub fn init_tracing() {
    tracing_subscriber::fmt::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init()
        .ok();
}

/// Scripted server: accepts every handshake unless told otherwise.
///
/// Async replies are completed from a separate thread, like an IO callback.
#[derive(Debug, Default)]
pub struct MockTransport {
    commands: Mutex<Vec<(String, Command)>>,
    rejected: Mutex<HashSet<String>>,
    broken: Mutex<HashSet<String>>,
    garbled: Mutex<HashSet<String>>,
    sasl_continues: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Server answers the final command for `database` with an auth failure.
    pub fn reject(&self, database: &str) {
        self.rejected.lock().unwrap().insert(database.into());
    }

    pub fn accept(&self, database: &str) {
        self.rejected.lock().unwrap().remove(database);
    }

    /// Network error on every command for `database`.
    pub fn break_database(&self, database: &str) {
        self.broken.lock().unwrap().insert(database.into());
    }

    /// Server answers with a reply the handshake does not expect.
    pub fn garble(&self, database: &str) {
        self.garbled.lock().unwrap().insert(database.into());
    }

    pub fn commands(&self) -> Vec<(String, Command)> {
        self.commands.lock().unwrap().clone()
    }

    pub fn clear_commands(&self) {
        self.commands.lock().unwrap().clear();
    }

    /// Databases in the order their handshake started.
    pub fn handshakes(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|(_, cmd)| matches!(cmd, Command::GetNonce | Command::SaslStart(_)))
            .map(|(database, _)| database)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn reply(&self, database: &str, command: &Command) -> io::Result<Reply> {
        self.commands
            .lock()
            .unwrap()
            .push((database.into(), command.clone()));
        if self.broken.lock().unwrap().contains(database) {
            return Err(io::ErrorKind::ConnectionReset.into());
        }
        if self.garbled.lock().unwrap().contains(database) {
            return Ok(ReplyBody::Ok.into());
        }
        let rejected = self.rejected.lock().unwrap().contains(database);
        let body = match command {
            Command::GetNonce => ReplyBody::Nonce(Nonce::new(NONCE)),
            Command::Authenticate(_) if rejected => {
                ReplyBody::Error(ServerError::authentication_failed())
            }
            Command::Authenticate(_) => ReplyBody::Ok,
            Command::SaslStart(_) if rejected => {
                ReplyBody::Error(ServerError::authentication_failed())
            }
            Command::SaslStart(_) => {
                self.sasl_continues.store(0, Ordering::SeqCst);
                ReplyBody::Sasl(SaslReply::new(CONVERSATION_ID, false, b"challenge-0".to_vec()))
            }
            Command::SaslContinue(cont) => {
                assert_eq!(cont.conversation_id, CONVERSATION_ID);
                let round = self.sasl_continues.fetch_add(1, Ordering::SeqCst) + 1;
                let payload = format!("challenge-{round}").into_bytes();
                ReplyBody::Sasl(SaslReply::new(CONVERSATION_ID, round >= SASL_ROUNDS, payload))
            }
            other => ReplyBody::Error(ServerError::new(59, format!("no such command: {other:?}"))),
        };
        Ok(body.into())
    }

    fn enter(&self) {
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    fn host(&self) -> &str {
        "localhost"
    }

    fn execute(&self, database: &str, command: &Command) -> io::Result<Reply> {
        self.enter();
        let reply = self.reply(database, command);
        self.leave();
        reply
    }

    async fn execute_async(&self, database: &str, command: &Command) -> io::Result<Reply> {
        self.enter();
        let reply = self.reply(database, command);
        let (tx, rx) = tokio::sync::oneshot::channel();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(1));
            tx.send(reply).ok();
        });
        let reply = rx
            .await
            .unwrap_or_else(|_| Err(io::ErrorKind::BrokenPipe.into()));
        self.leave();
        reply
    }
}

/// SASL client standing in for a Kerberos context.
#[derive(Debug, Default, Clone)]
pub struct MockSaslClient {
    pub challenges: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl SaslClient for MockSaslClient {
    fn initial_response(&mut self) -> Result<Vec<u8>, BoxedError> {
        Ok(b"ticket".to_vec())
    }

    fn evaluate_challenge(&mut self, challenge: &[u8]) -> Result<Vec<u8>, BoxedError> {
        self.challenges.lock().unwrap().push(challenge.to_vec());
        Ok(b"response".to_vec())
    }
}

pub fn gssapi_config() -> AuthenticatorConfig {
    AuthenticatorConfig::new().gssapi_provider(
        |_: &Credential, _: &str, _: &str| -> Result<Box<dyn SaslClient>, BoxedError> {
            Ok(Box::new(MockSaslClient::default()))
        },
    )
}

pub fn mongodb_cr(database: &str) -> Credential {
    Credential::mongodb_cr(format!("user_{database}"), database, "pencil")
}

pub fn caching_authenticator(
    credentials: impl IntoIterator<Item = Credential>,
    config: AuthenticatorConfig,
) -> (Arc<CredentialsStore>, Arc<MockTransport>, CachingAuthenticator) {
    init_tracing();
    let store = Arc::new(CredentialsStore::new(credentials).unwrap());
    let transport = MockTransport::new();
    let caching = CachingAuthenticator::new(store.clone(), transport.clone(), Arc::new(config));
    (store, transport, caching)
}
