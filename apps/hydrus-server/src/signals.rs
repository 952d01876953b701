//! Shutdown trigger for the serve loop.

use std::fmt;

use anyhow::{Context, Result};
use tokio::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
        })
    }
}

/// Resolves with the first of Ctrl+C or SIGTERM. SIGTERM is watched on unix only.
///
/// # Errors
/// Fails when a signal listener cannot be installed.
pub async fn shutdown_signal() -> Result<ShutdownSignal> {
    #[cfg(unix)]
    let terminated = {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?;
        async move {
            terminate.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminated = std::future::pending::<()>();

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            Ok(ShutdownSignal::Interrupt)
        }
        () = terminated => Ok(ShutdownSignal::Terminate),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn signals_log_by_their_unix_name() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
