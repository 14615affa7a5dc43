pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;

pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::ai::AiClient;
use std::sync::mpsc;

/// Handles the input layer needs to start background work
pub struct RuntimeContext<'a> {
    pub tx: &'a mpsc::Sender<messages::BackgroundMessage>,
    pub client: &'a AiClient,
}
