//! Deadlines as cancellation
//!
//! Every operation takes a [`CancellationToken`]. A deadline is a child
//! token that a timer cancels, so code downstream only ever watches one
//! signal.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Child of `parent` that is also cancelled once `timeout` elapses.
///
/// The timer task ends early if the token is cancelled first.
pub fn deadline(parent: &CancellationToken, timeout: Duration) -> CancellationToken {
    let child = parent.child_token();
    let timer = child.clone();
    tokio::spawn(async move {
        tokio::select! {
            () = timer.cancelled() => {}
            () = tokio::time::sleep(timeout) => timer.cancel(),
        }
    });
    child
}
