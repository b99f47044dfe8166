use notaxia_api::Navigator;
use notaxia_session::LOGIN_ROUTE;
use tracing::{info, warn};

/// Reports forced route changes on the terminal instead of following them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: &str) {
        if route == LOGIN_ROUTE {
            warn!("signed out; run `notaxia-admin login --email <address>` to sign in again");
        } else {
            info!(route, "redirect");
        }
    }
}
