//! Input handling for the scribe TUI

use crate::app::background;
use crate::app::RuntimeContext;
use crate::session::Action;
use crate::ui::{App, InputMode, Overlay};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod editor;
mod normal;
mod overlay;

use editor::handle_editor_input;
use normal::handle_normal_mode;
use overlay::handle_overlay_input;

/// Main key event handler - dispatches to mode-specific handlers
pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    if app.overlay != Overlay::None {
        return handle_overlay_input(app, key);
    }

    match app.input_mode {
        InputMode::EditChat | InputMode::EditInstructions => handle_editor_input(app, key, ctx),
        InputMode::Normal => handle_normal_mode(app, key),
    }
}

/// Bracketed paste goes to the open text field, if any
pub fn handle_paste(app: &mut App, text: &str) {
    if app.overlay == Overlay::None {
        app.paste(text);
    } else if let Overlay::Settings { input } | Overlay::AddFiles { input } = &mut app.overlay {
        input.push_str(text.trim_end_matches(['\r', '\n']));
    }
}

/// Submit the chat prompt and start the request in the background
fn submit(app: &mut App, ctx: &RuntimeContext) {
    if app.is_loading() {
        app.show_toast("Still waiting for the previous response");
        return;
    }
    if let Some(request) = app.dispatch(Action::Submit) {
        app.stop_editing();
        background::spawn_completion(
            ctx.tx.clone(),
            ctx.client.clone(),
            app.session.api_key.clone(),
            request,
        );
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ai::AiClient;
    use crate::app::messages::BackgroundMessage;
    use crate::config::Config;
    use crate::session::Session;
    use crate::ui::App;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;

    pub fn app() -> App {
        App::new(Session::default(), Config::default())
    }

    pub fn channel_and_client() -> (
        mpsc::Sender<BackgroundMessage>,
        mpsc::Receiver<BackgroundMessage>,
        AiClient,
    ) {
        let (tx, rx) = mpsc::channel();
        let client = AiClient::new(&Config::default()).unwrap();
        (tx, rx, client)
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}
