//! Periodic status poll against the appliance endpoint.
//!
//! One request in flight at a time: the next tick is scheduled only after
//! the previous reply (or failure) has been handed over, so slow controllers
//! never pile up overlapping polls.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use super::transport::ActionTransport;
use super::types::{ActionRequest, ActionResponse, Endpoint, TransportError};

pub const STATUS_ACTION: &str = "status";

/// Polls until `on_tick` returns false (its receiver went away).
pub async fn run<T, F>(transport: Arc<T>, interval: Duration, mut on_tick: F)
where
    T: ActionTransport + ?Sized,
    F: FnMut(Result<ActionResponse, TransportError>) -> bool,
{
    let request = ActionRequest::new(STATUS_ACTION);
    loop {
        let result = transport.send(Endpoint::Appliance, &request).await;
        if let Err(ref e) = result {
            debug!("Status poll failed: {}", e);
        }
        if !on_tick(result) {
            debug!("Status poller stopping: receiver gone");
            return;
        }
        tokio::time::sleep(interval).await;
    }
}
