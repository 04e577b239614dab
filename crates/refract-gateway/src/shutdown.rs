//! Shutdown coordination.
//!
//! The signal listener maps a received signal to the conventional
//! `128 + signo` exit code and publishes it on a watch channel. The serve
//! loop waits on the channel for its graceful-stop trigger, and `main`
//! reads the code back once the server has drained.

use std::future::Future;
use tokio::sync::watch;

/// Coordinates graceful shutdown and carries the exit code.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    tx: watch::Sender<Option<i32>>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    /// Create an idle coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Request shutdown with the given exit code. The first trigger wins.
    pub fn trigger(&self, code: i32) {
        self.tx.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = Some(code);
                true
            } else {
                false
            }
        });
    }

    /// Completes once shutdown has been requested.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // wait_for fails only when every sender is gone; treat that as
            // a shutdown request too.
            let _ = rx.wait_for(Option::is_some).await;
        }
    }

    /// The exit code shutdown was requested with, or 0.
    pub fn exit_code(&self) -> i32 {
        self.tx.borrow().unwrap_or(0)
    }

    /// Spawn the signal listener: SIGINT and SIGTERM trigger shutdown
    /// with `128 + signo`, matching shell convention.
    #[cfg(unix)]
    pub fn listen_for_signals(&self) {
        use tokio::signal::unix::{signal, SignalKind};

        let coordinator = self.clone();
        tokio::spawn(async move {
            let mut interrupt = match signal(SignalKind::interrupt()) {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::error!(error = %e, "cannot install SIGINT handler");
                    return;
                }
            };
            let mut terminate = match signal(SignalKind::terminate()) {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::error!(error = %e, "cannot install SIGTERM handler");
                    return;
                }
            };
            let kind = tokio::select! {
                _ = interrupt.recv() => SignalKind::interrupt(),
                _ = terminate.recv() => SignalKind::terminate(),
            };
            tracing::info!(signal = kind.as_raw_value(), "received shutdown signal");
            coordinator.trigger(128 + kind.as_raw_value());
        });
    }

    /// Fallback for platforms without Unix signal streams.
    #[cfg(not(unix))]
    pub fn listen_for_signals(&self) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                coordinator.trigger(130);
            }
        });
    }
}
