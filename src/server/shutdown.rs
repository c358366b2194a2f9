use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

pub(crate) fn shutdown_signal() -> (ServerShutdownHandle, ServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (ServerShutdownHandle { tx: Some(tx) }, ServerShutdownSignal { rx })
}

/// The server stops accepting requests once this handle is dropped or `shutdown()` is called.
pub(crate) struct ServerShutdownHandle {
    tx: Option<oneshot::Sender<()>>,
}

impl ServerShutdownHandle {
    pub(crate) fn shutdown(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(());
        }
    }
}

pub(crate) struct ServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for ServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let rx = Pin::new(&mut self.rx);

        match rx.poll(cx) {
            Poll::Pending => Poll::Pending,
            // We don't care if oneshot Sender sent value or dropped
            Poll::Ready(_) => Poll::Ready(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[tokio::test]
    async fn signal_fires_on_explicit_shutdown() {
        let (mut handle, signal) = shutdown_signal();
        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(1), signal).await.expect("signal");
    }

    #[tokio::test]
    async fn signal_fires_on_drop() {
        let (handle, signal) = shutdown_signal();
        drop(handle);
        tokio::time::timeout(Duration::from_secs(1), signal).await.expect("signal");
    }

    #[tokio::test]
    async fn signal_pending_while_handle_alive() {
        let (_handle, signal) = shutdown_signal();
        tokio::time::timeout(Duration::from_millis(20), signal)
            .await
            .expect_err("Expected timeout");
    }
}
