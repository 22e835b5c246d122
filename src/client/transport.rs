use async_trait::async_trait;

use super::types::{ActionRequest, ActionResponse, Endpoint, TransportError};

/// Anything that can carry an action request to a controller endpoint.
///
/// The console only ever talks to controllers through this trait, so tests
/// can swap in a scripted stub instead of a real HTTP client.
#[async_trait]
pub trait ActionTransport: Send + Sync {
    /// Sends `request` to `endpoint` and waits for the reply.
    ///
    /// Fails only when the round-trip itself fails. A controller that
    /// rejects the action still answers `Ok`, with an `error` field.
    async fn send(
        &self,
        endpoint: Endpoint,
        request: &ActionRequest,
    ) -> Result<ActionResponse, TransportError>;
}
