//! TCP accept loop for Wyoming listeners.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::handlers::{Capabilities, serve_connection};
use crate::state::AppState;

/// Back-off after a failed accept (e.g. file descriptor exhaustion)
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Accept connections forever, one task per connection.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    capabilities: Capabilities,
) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    info!("Wyoming server listening on tcp://{} ({:?})", local_addr, capabilities);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
        }

        let session_id = Uuid::new_v4().to_string();
        info!("Accepted connection from {} (session {})", peer, session_id);

        let state = state.clone();
        tokio::spawn(async move {
            serve_connection(stream, state, capabilities).await;
            info!("Session {} ended", session_id);
        });
    }
}
