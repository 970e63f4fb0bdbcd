//! Session lifecycle management for the Strata client
//!
//! The session manager owns the single authentication session of a running
//! application: an opaque bearer token persisted in secure storage and the
//! identity derived from its claims. It mediates between three collaborators:
//! the credential store, the remote authentication API, and the UI routing
//! layer that reacts to authentication transitions.
//!
//! Invariant held at every observation point: the session is authenticated
//! iff a token is present, decodable, unexpired, and accepted by the
//! backend's last verification; the derived identity is present iff the
//! session is authenticated.

pub mod claims;
pub mod manager;
pub mod routing;
pub mod store;
pub mod types;

pub use claims::Claims;
pub use manager::SessionManager;
pub use routing::{Route, RouteBroadcaster};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY};
pub use types::{Identity, Session};
