use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

/// Shared login state. Holds the bearer token; "authenticated" means a token
/// is present. Every change is published to subscribers.
#[derive(Clone, Debug)]
pub struct AuthState {
    token: Arc<watch::Sender<Option<String>>>,
}

impl AuthState {
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self {
            token: Arc::new(watch::Sender::new(token)),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn login(&self, token: String) {
        info!("auth_login");
        self.token.send_replace(Some(token));
    }

    pub fn logout(&self) {
        info!("auth_logout");
        self.token.send_replace(None);
    }

    /// The backend rejected our token. Same as a logout, but only once.
    pub fn expire(&self) {
        let was_authenticated = self.token.send_if_modified(|token| token.take().is_some());
        if was_authenticated {
            warn!("auth_token_expired");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}

const KEYRING_SERVICE: &str = "soundshare";
const KEYRING_USER: &str = "access-token";

/// Keeps the access token in the OS keyring between runs.
pub struct CredentialStore;

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
impl CredentialStore {
    fn entry() -> Option<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)
            .inspect_err(|e| warn!(error = %e, "keyring_unavailable"))
            .ok()
    }

    pub fn load() -> Option<String> {
        match Self::entry()?.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, "keyring_read_failed");
                None
            }
        }
    }

    pub fn save(token: &str) {
        if let Some(entry) = Self::entry()
            && let Err(e) = entry.set_password(token)
        {
            warn!(error = %e, "keyring_write_failed");
        }
    }

    pub fn clear() {
        if let Some(entry) = Self::entry() {
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => warn!(error = %e, "keyring_delete_failed"),
            }
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
impl CredentialStore {
    pub fn load() -> Option<String> {
        let _ = (KEYRING_SERVICE, KEYRING_USER);
        None
    }

    pub fn save(_token: &str) {}

    pub fn clear() {}
}
