use std::sync::{Arc, RwLock};

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::session::token_store::TokenStore;

/// The held bearer token and where it is persisted.
///
/// Shared between the gateway client, which attaches and drops the token,
/// and the controller, which begins and ends sessions.
pub struct Session {
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            token: RwLock::new(None),
            store,
        }
    }

    /// Loads a persisted token into memory. Returns whether one was found.
    pub fn restore(&self) -> Result<bool> {
        let stored = self.store.load()?;
        let found = stored.is_some();
        *self.write()? = stored;
        debug!("Session restore: token {}", if found { "found" } else { "absent" });
        Ok(found)
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Holds and persists a freshly issued token.
    ///
    /// Persisting is best effort: the token is held for this run even when
    /// the store rejects it.
    pub fn begin(&self, token: String) -> Result<()> {
        let mut held = self.write()?;
        if let Err(e) = self.store.save(&token) {
            warn!("Token not persisted, session lasts until exit: {}", e);
        }
        *held = Some(token);
        Ok(())
    }

    /// Drops the token from memory and storage.
    ///
    /// The in-memory token is dropped even when the store fails, so no
    /// further request carries it.
    pub fn end(&self) -> Result<()> {
        let mut held = self.write()?;
        *held = None;
        self.clear_store()
    }

    /// Ends the session only if it still holds `expected`, the token a
    /// request was sent with. Returns whether the session was ended.
    pub fn end_if(&self, expected: Option<&str>) -> Result<bool> {
        let mut held = self.write()?;
        if held.as_deref() != expected {
            debug!("Token changed since the request was sent, keeping session");
            return Ok(false);
        }
        *held = None;
        // The token is already gone from memory; a failed clear is logged.
        let _ = self.clear_store();
        Ok(true)
    }

    fn clear_store(&self) -> Result<()> {
        self.store.clear().inspect_err(|e| {
            warn!("Failed to clear persisted token: {}", e);
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Option<String>>> {
        self.token
            .write()
            .map_err(|_| Error::TokenStore("Session lock poisoned".into()))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
