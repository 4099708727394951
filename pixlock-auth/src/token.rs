//! Pull-based bearer token access.
//!
//! Clients never hold a token directly; they hold a `TokenProvider` and ask
//! for the current token at call time. The host application decides where
//! tokens come from (usually its identity-provider session).

use std::sync::{Arc, RwLock};

/// Capability handed to every client that issues authenticated requests.
///
/// Returning `None` means no session is available right now; callers must
/// fail fast rather than send an unauthenticated request.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Any closure yielding an optional token is a provider.
impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// Shared token slot the host sets once it has a valid session.
///
/// Reads are whole-value clones; the single writer replaces the value
/// atomically. A poisoned lock degrades to "no token" instead of panicking.
#[derive(Clone, Default)]
pub struct SessionTokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the current session token.
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(token.into());
        }
    }

    /// Clears the token, e.g. on logout.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }
}

impl TokenProvider for SessionTokenStore {
    fn token(&self) -> Option<String> {
        self.inner.read().map(|slot| slot.clone()).unwrap_or(None)
    }
}
