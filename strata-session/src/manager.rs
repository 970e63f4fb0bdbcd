//! Session manager
//!
//! Owns the application's single authentication session: restoring it from
//! stored credentials on startup, establishing it through login or signup,
//! and tearing it down on logout.
//!
//! Two rules keep overlapping async calls from corrupting state. Every
//! mutation builds a complete next snapshot and performs one assignment
//! under the write guard, so readers never observe a half-updated session.
//! Mutating operations are additionally serialized through a single-slot
//! lock, so a restore triggered by one UI lifecycle hook cannot interleave
//! its I/O with a login triggered by another.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use strata_client::AuthApi;
use strata_core::{StrataError, StrataResult};

use crate::claims::Claims;
use crate::routing::{Route, RouteBroadcaster};
use crate::store::{CredentialStore, TOKEN_KEY};
use crate::types::Session;

/// Manages the application's single authentication session
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    api: Arc<dyn AuthApi>,
    session: RwLock<Session>,
    routes: RouteBroadcaster,
    /// Serializes mutating operations; see module docs
    op_lock: Mutex<()>,
}

impl SessionManager {
    /// Create a session manager over the given collaborators.
    ///
    /// The session starts unauthenticated; call [`restore_session`] to pick
    /// up a previously persisted token.
    ///
    /// [`restore_session`]: SessionManager::restore_session
    pub fn new(store: Arc<dyn CredentialStore>, api: Arc<dyn AuthApi>) -> Self {
        Self {
            store,
            api,
            session: RwLock::new(Session::unauthenticated()),
            routes: RouteBroadcaster::new(),
            op_lock: Mutex::new(()),
        }
    }

    /// Current session snapshot
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Subscribe to navigation signals emitted on authentication transitions
    pub fn subscribe_routes(&self) -> tokio::sync::broadcast::Receiver<Route> {
        self.routes.subscribe()
    }

    /// Restore the session from the persisted token, if any.
    ///
    /// Returns `false` when no valid session could be restored. A token that
    /// fails verification, decoding, or the expiry check is deleted from
    /// storage on the way out. Safe to call repeatedly; a second call with
    /// no intervening state change reaches the same final session.
    pub async fn restore_session(&self) -> StrataResult<bool> {
        let _op = self.op_lock.lock().await;
        self.mark_loading().await;

        let stored = match self.store.get(TOKEN_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                // Storage failure: fail closed to unauthenticated
                warn!("Credential store read failed during restore: {}", e);
                self.replace(Session::unauthenticated()).await;
                self.routes.signal(Route::Login);
                return Err(e);
            }
        };

        let Some(token) = stored else {
            debug!("No stored token; session is unauthenticated");
            self.replace(Session::unauthenticated()).await;
            self.routes.signal(Route::Login);
            return Ok(false);
        };

        let verified = match self.api.verify_token(&token).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Token verification unreachable: {}", e);
                false
            }
        };
        if !verified {
            info!("Stored token rejected by backend; clearing session");
            return self.discard_token().await;
        }

        let claims = match Claims::decode(&token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Stored token failed claim decoding: {}", e);
                return self.discard_token().await;
            }
        };

        if claims.is_expired() {
            info!("Stored token expired; clearing session");
            return self.discard_token().await;
        }

        let identity = claims.to_identity();
        info!(user_id = %identity.user_id, "Session restored");
        self.replace(Session::established(identity, token)).await;
        self.routes.signal(Route::Home);
        Ok(true)
    }

    /// Authenticate with the backend and establish a new session.
    ///
    /// Inputs are validated by the caller. On any failure the previous
    /// authentication state is left untouched, the loading flag is cleared,
    /// and the error carries a message the UI can display.
    pub async fn login(&self, email: &str, password: &str) -> StrataResult<()> {
        let _op = self.op_lock.lock().await;
        self.mark_loading().await;

        let response = match self.api.login(email, password).await {
            Ok(response) => response,
            Err(e) => return self.abort_establish(e).await,
        };

        self.establish(response.access_token).await
    }

    /// Register a new account and establish a session for it.
    ///
    /// Same contract shape as [`login`]: success persists the token and
    /// switches to authenticated; failure leaves prior state untouched.
    ///
    /// [`login`]: SessionManager::login
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        community_code: &str,
    ) -> StrataResult<()> {
        let _op = self.op_lock.lock().await;
        self.mark_loading().await;

        let response = match self.api.signup(name, email, password, community_code).await {
            Ok(response) => response,
            Err(e) => return self.abort_establish(e).await,
        };

        self.establish(response.access_token).await
    }

    /// Tear down the session unconditionally.
    ///
    /// The stored token is deleted regardless of in-memory state, and the
    /// in-memory reset happens even when deletion fails: a token that may
    /// still exist on disk is no longer trusted either way. A storage
    /// failure is reported to the caller after the reset.
    pub async fn logout(&self) -> StrataResult<()> {
        let _op = self.op_lock.lock().await;

        let deleted = self.store.delete(TOKEN_KEY).await;
        if let Err(ref e) = deleted {
            warn!("Failed to delete stored token during logout: {}", e);
        }

        self.replace(Session::unauthenticated()).await;
        self.routes.signal(Route::Login);
        info!("Session terminated");
        deleted
    }

    /// Replace the live session with a complete snapshot
    async fn replace(&self, next: Session) {
        *self.session.write().await = next;
    }

    /// Set the loading flag, preserving the rest of the current snapshot
    async fn mark_loading(&self) {
        let mut next = self.snapshot().await;
        next.loading = true;
        self.replace(next).await;
    }

    /// Clear the loading flag, preserving prior authentication state, and
    /// hand the failure back to the caller
    async fn abort_establish(&self, error: StrataError) -> StrataResult<()> {
        let mut next = self.snapshot().await;
        next.loading = false;
        self.replace(next).await;
        Err(error)
    }

    /// Delete the persisted token and reset to the unauthenticated default
    async fn discard_token(&self) -> StrataResult<bool> {
        if let Err(e) = self.store.delete(TOKEN_KEY).await {
            warn!("Failed to delete stored token: {}", e);
        }
        self.replace(Session::unauthenticated()).await;
        self.routes.signal(Route::Login);
        Ok(false)
    }

    /// Persist a freshly issued token, derive its identity, and switch the
    /// session to authenticated in one snapshot replacement.
    async fn establish(&self, token: String) -> StrataResult<()> {
        if let Err(e) = self.store.set(TOKEN_KEY, &token).await {
            warn!("Failed to persist token: {}", e);
            return self.abort_establish(e).await;
        }

        let claims = match Claims::decode(&token) {
            Ok(claims) if !claims.is_expired() => claims,
            Ok(_) => {
                // Never keep a token that is already unusable
                let _ = self.store.delete(TOKEN_KEY).await;
                let error = StrataError::authentication(
                    "Backend issued an expired token",
                    "session_manager",
                );
                return self.abort_establish(error).await;
            }
            Err(e) => {
                // Never keep a token we cannot derive an identity from
                let _ = self.store.delete(TOKEN_KEY).await;
                return self.abort_establish(e).await;
            }
        };

        let identity = claims.to_identity();
        info!(user_id = %identity.user_id, "Session established");
        self.replace(Session::established(identity, token)).await;
        self.routes.signal(Route::Home);
        Ok(())
    }
}
