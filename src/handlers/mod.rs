//! Wyoming request handlers
//!
//! - `info` - Capability advertisement answered for `describe`
//! - `session` - Per-connection routing between transcription and synthesis

pub mod info;
pub mod session;

pub use info::build_info;
pub use session::{Capabilities, SessionRouter, serve_connection};
