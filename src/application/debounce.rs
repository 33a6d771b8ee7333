//! Wait for a changing value to settle before acting on it.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Wait until the watched value has not changed for `delay`, then return it.
///
/// Each change restarts the wait. Returns `None` once the sender is gone
/// and no change is left unseen.
pub async fn settled<T: Clone>(rx: &mut watch::Receiver<T>, delay: Duration) -> Option<T> {
    rx.changed().await.ok()?;
    loop {
        match timeout(delay, rx.changed()).await {
            Err(_elapsed) => return Some(rx.borrow_and_update().clone()),
            Ok(Ok(())) => continue,
            // Sender dropped mid-burst: the last value still counts.
            Ok(Err(_closed)) => return Some(rx.borrow_and_update().clone()),
        }
    }
}
