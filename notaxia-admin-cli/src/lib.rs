//! Notaxia admin console.
//!
//! Each command stands in for a dashboard page: it is mapped to that page's
//! route, passed through the session guard, and only then sent to the API.
//! Results are printed as JSON.

pub mod cli;
mod console;
mod navigator;

pub use cli::{Cli, Command};
pub use console::{Console, api_config, session_store};
pub use navigator::TerminalNavigator;
