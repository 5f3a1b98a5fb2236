//! Signal handling for the foreground watcher.
//!
//! The watch loop runs until it fails or the process is asked to stop (SIGTERM or
//! SIGINT on Unix, Ctrl+C on Windows). Stopping drops the loop between awaits, so
//! no half-written annotation is left behind: an answer is either stored on the
//! server or not remembered at all.
//!
//! The terminal prompt blocks the thread it runs on, so the signal listener lives
//! in its own task. When a signal arrives while a prompt is open the loop cannot
//! be dropped; after a short grace period the listener ends the process itself.
//! Ctrl+C typed into the prompt is not a signal at all but a [`PromptInterrupted`]
//! error, which is also a clean shutdown.

use crate::libs::messages::Message;
use crate::libs::prompt::PromptInterrupted;
use crate::{msg_error, msg_info};
use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// How long a blocked watch loop gets to notice a shutdown before the process exits.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Drives `watcher` until it returns or a shutdown signal arrives.
///
/// The watcher's own error is returned to the caller; a signal or an interrupted
/// prompt is a clean exit.
pub async fn run_until_shutdown<F>(watcher: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let listener = tokio::spawn(async move {
        if let Err(e) = shutdown_signal().await {
            msg_error!(Message::WatcherError(e.to_string()));
            return;
        }
        let _ = shutdown_tx.send(());

        tokio::time::sleep(SHUTDOWN_GRACE).await;
        msg_info!(Message::WatcherShuttingDown);
        std::process::exit(0);
    });

    let outcome = tokio::select! {
        result = watcher => finish(result),
        Ok(()) = shutdown_rx => {
            msg_info!(Message::WatcherShuttingDown);
            Ok(())
        }
    };

    listener.abort();
    outcome
}

fn finish(result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => {
            msg_info!(Message::WatcherExitedNormally);
            Ok(())
        }
        Err(e) if e.is::<PromptInterrupted>() => {
            msg_info!(Message::WatcherShuttingDown);
            Ok(())
        }
        Err(e) => {
            msg_error!(Message::WatcherError(e.to_string()));
            Err(e)
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => msg_info!(Message::WatcherReceivedSigterm),
        _ = sigint.recv() => msg_info!(Message::WatcherReceivedSigint),
    }
    Ok(())
}

#[cfg(windows)]
async fn shutdown_signal() -> Result<()> {
    match tokio::signal::ctrl_c().await {
        Ok(()) => msg_info!(Message::WatcherReceivedCtrlC),
        Err(e) => {
            msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
            return Err(e.into());
        }
    }
    Ok(())
}

#[cfg(not(any(unix, windows)))]
async fn shutdown_signal() -> Result<()> {
    crate::msg_warning!(Message::WatcherSignalHandlingNotSupported);
    std::future::pending::<Result<()>>().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_watcher_result_is_returned() {
        let result = run_until_shutdown(async { Err(anyhow::anyhow!("boom")) }).await;
        assert_eq!(result.unwrap_err().to_string(), "boom");
    }

    #[tokio::test]
    async fn test_clean_exit() {
        assert!(run_until_shutdown(async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_interrupted_prompt_is_a_clean_exit() {
        let result = run_until_shutdown(async { Err(PromptInterrupted.into()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_other_interruptions_are_errors() {
        let result = run_until_shutdown(async {
            Err(anyhow::Error::new(std::io::Error::new(std::io::ErrorKind::Interrupted, "read")))
        })
        .await;
        assert!(result.is_err());
    }
}
