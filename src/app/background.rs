//! Background work for the TUI
//!
//! Channel sends use `let _ =`: a send only fails once the receiver is gone,
//! which happens during shutdown.

use crate::ai::AiClient;
use crate::app::messages::BackgroundMessage;
use crate::pipeline::CompletionRequest;
use crate::session::Action;
use crate::ui::App;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;
use tracing::{error, warn};

/// Feed finished background work back into the app
pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            BackgroundMessage::CompletionReady(text) => {
                app.dispatch(Action::Completed(Ok(text)));
            }
            BackgroundMessage::CompletionFailed(reason) => {
                app.dispatch(Action::Completed(Err(reason)));
            }
            BackgroundMessage::Error(e) => {
                // A crashed request task must still end the submission
                if app.is_loading() {
                    app.dispatch(Action::Completed(Err(e)));
                } else {
                    app.show_toast(&format!("Error: {}", e));
                }
            }
        }
    }
}

/// Run one completion request and report the outcome on `tx`
pub fn spawn_completion(
    tx: mpsc::Sender<BackgroundMessage>,
    client: AiClient,
    api_key: Option<String>,
    request: CompletionRequest,
) {
    let tx_result = tx.clone();
    spawn_background(tx, "completion", async move {
        match client.complete(api_key.as_deref(), &request).await {
            Ok(text) => {
                let _ = tx_result.send(BackgroundMessage::CompletionReady(text));
            }
            Err(e) => {
                warn!(error = %e, "completion request failed");
                let _ = tx_result.send(BackgroundMessage::CompletionFailed(e.user_message()));
            }
        }
    });
}

pub fn spawn_background<F>(tx: mpsc::Sender<BackgroundMessage>, task_name: &'static str, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let detail = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            };
            error!(task = task_name, detail = %detail, "background task panicked");
            let _ = tx.send(BackgroundMessage::Error(format!(
                "Background task '{}' crashed unexpectedly: {}",
                task_name, detail
            )));
        }
    });
}
