//! UI routing signals
//!
//! Authentication transitions are broadcast to the UI layer as fire-and-forget
//! navigation instructions; the session manager never waits on a subscriber.

use tokio::sync::broadcast;
use tracing::debug;

/// Navigation target for the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Authenticated area of the application
    Home,
    /// Unauthenticated entry screen
    Login,
}

/// Broadcasts route changes to any number of UI subscribers
pub struct RouteBroadcaster {
    sender: broadcast::Sender<Route>,
}

impl RouteBroadcaster {
    pub fn new() -> Self {
        // Small buffer; navigation signals are consumed promptly or dropped
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    /// Subscribe to navigation signals
    pub fn subscribe(&self) -> broadcast::Receiver<Route> {
        self.sender.subscribe()
    }

    /// Fire-and-forget: a missing subscriber is not an error
    pub fn signal(&self, route: Route) {
        debug!(?route, "Routing signal");
        let _ = self.sender.send(route);
    }
}

impl Default for RouteBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_signals() {
        let broadcaster = RouteBroadcaster::new();
        let mut receiver = broadcaster.subscribe();

        broadcaster.signal(Route::Home);
        assert_eq!(receiver.recv().await.unwrap(), Route::Home);
    }

    #[test]
    fn signalling_without_subscribers_is_ok() {
        let broadcaster = RouteBroadcaster::new();
        broadcaster.signal(Route::Login);
    }
}
