use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    future::{self, BoxFuture, FusedFuture},
    ready, FutureExt,
};

use crate::{caching::CachingAuthenticator, error::AuthenticationError};

enum State {
    AtDatabase {
        index: usize,
        handshake: Option<BoxFuture<'static, Result<(), AuthenticationError>>>,
    },
    Succeeded,
    Failed,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AtDatabase { index, handshake } => f
                .debug_struct("AtDatabase")
                .field("index", index)
                .field("started", &handshake.is_some())
                .finish(),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Future returned by [`CachingAuthenticator::authenticate_all_async`].
///
/// Walks the databases in order, starting the next handshake only when the
/// previous one has succeeded. Wake-ups may come from any thread. Polling it
/// again after completion panics.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct AuthenticateAll<'a> {
    caching: &'a CachingAuthenticator,
    databases: Vec<String>,
    state: State,
}

impl fmt::Debug for AuthenticateAll<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AuthenticateAll")
            .field("databases", &self.databases)
            .field("state", &self.state)
            .finish()
    }
}

impl<'a> AuthenticateAll<'a> {
    pub(super) fn new(caching: &'a CachingAuthenticator, databases: Vec<String>) -> Self {
        Self {
            caching,
            databases,
            state: State::AtDatabase {
                index: 0,
                handshake: None,
            },
        }
    }

    pub fn databases(&self) -> &[String] {
        &self.databases
    }
}

impl Future for AuthenticateAll<'_> {
    type Output = Result<(), AuthenticationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            let (index, handshake) = match &mut this.state {
                State::AtDatabase { index, handshake } => (*index, handshake),
                State::Succeeded | State::Failed => {
                    panic!("`AuthenticateAll` polled after completion")
                }
            };
            let Some(database) = this.databases.get(index) else {
                this.state = State::Succeeded;
                return Poll::Ready(Ok(()));
            };
            if handshake.is_none() && this.caching.is_authenticated(database) {
                // completed by a concurrent call
                this.state = State::AtDatabase {
                    index: index + 1,
                    handshake: None,
                };
                continue;
            }
            let handshake =
                handshake.get_or_insert_with(|| match this.caching.authenticator(database) {
                    Ok(auth) => async move { auth.authenticate_async().await }.boxed(),
                    Err(error) => future::ready(Err(error)).boxed(),
                });
            let result = ready!(handshake.poll_unpin(cx));
            match this.caching.complete(database, result) {
                Ok(()) => {
                    this.state = State::AtDatabase {
                        index: index + 1,
                        handshake: None,
                    };
                }
                Err(error) => {
                    this.state = State::Failed;
                    return Poll::Ready(Err(error));
                }
            }
        }
    }
}

impl FusedFuture for AuthenticateAll<'_> {
    fn is_terminated(&self) -> bool {
        matches!(self.state, State::Succeeded | State::Failed)
    }
}
