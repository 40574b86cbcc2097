pub mod config;
pub mod core;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod state;

// Re-export commonly used items for convenience
pub use config::{BridgeMode, ServerConfig};
pub use core::*;
pub use handlers::{Capabilities, SessionRouter};
pub use state::AppState;
