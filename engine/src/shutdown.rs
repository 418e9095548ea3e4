//! Cooperative shutdown signal.
//!
//! A `watch<bool>` flag: the trigger flips it once, receivers either peek
//! at it between steps or await it alongside a suspension point.

use tokio::sync::watch;

/// Creates a connected trigger/signal pair, initially not requested.
pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger(tx), Shutdown(rx))
}

/// Requests shutdown. Owned by whoever observes the interrupt.
#[derive(Debug)]
pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    /// Idempotent; never fails, even when every receiver is gone.
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct Shutdown(watch::Receiver<bool>);

impl Shutdown {
    /// Non-blocking check.
    pub fn is_requested(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolves once shutdown has been requested, immediately if it
    /// already was. Never resolves if the trigger is dropped unfired.
    pub async fn requested(&mut self) {
        if self.0.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
