//! Wyoming session handling
//!
//! - `router`: the per-connection state machine
//! - `connection`: framing, reader loop and writer task around one router

mod connection;
mod router;

pub use connection::{new_session_router, serve_connection};
pub use router::{Capabilities, EventKind, Mode, Route, SessionRouter, route};
