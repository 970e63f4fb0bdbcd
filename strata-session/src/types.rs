//! Session state types
//!
//! The session snapshot read by the UI layer. The live session is only ever
//! replaced wholesale; a partially updated snapshot is never observable.

use serde::{Deserialize, Serialize};

/// Identity derived from a decoded token.
///
/// Present iff the session is authenticated; never constructed from anything
/// but decoded claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub community_id: String,
    pub is_admin: bool,
    /// Token expiry, seconds since epoch
    pub expires_at: i64,
}

/// Snapshot of the authentication session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub identity: Option<Identity>,
    pub loading: bool,
    pub token: Option<String>,
}

impl Session {
    /// The default unauthenticated snapshot
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            identity: None,
            loading: false,
            token: None,
        }
    }

    /// An authenticated snapshot carrying a verified token and its identity
    pub fn established(identity: Identity, token: String) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
            loading: false,
            token: Some(token),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_unauthenticated() {
        let session = Session::default();
        assert!(!session.authenticated);
        assert!(session.identity.is_none());
        assert!(session.token.is_none());
        assert!(!session.loading);
    }

    #[test]
    fn established_session_holds_identity_and_token() {
        let identity = Identity {
            user_id: "42".to_string(),
            email: "a@b.com".to_string(),
            community_id: "HOA-1".to_string(),
            is_admin: false,
            expires_at: 2_000_000_000,
        };
        let session = Session::established(identity.clone(), "tok".to_string());
        assert!(session.authenticated);
        assert_eq!(session.identity, Some(identity));
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert!(!session.loading);
    }
}
