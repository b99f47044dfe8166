//! Navigation side effects.

use std::sync::Mutex;
use tracing::debug;

/// Receives route changes the client forces, such as the redirect to the
/// login page after a 401.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Ignores navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: &str) {
        debug!(route, "navigation ignored");
    }
}

/// Remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }

    /// The most recent route, if any.
    pub fn last(&self) -> Option<String> {
        self.routes
            .lock()
            .ok()
            .and_then(|routes| routes.last().cloned())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}
