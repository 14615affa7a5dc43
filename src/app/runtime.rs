//! TUI runtime for scribe
//!
//! One UI thread owns the [`App`]. Requests run as tokio tasks and report back
//! over a std channel that is drained once per tick.

use crate::ai::AiClient;
use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::ui;
use crate::ui::App;
use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::time::Duration;
use tracing::info;

/// Run the TUI until the user quits
pub async fn run_tui(mut app: App, client: AiClient) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel::<BackgroundMessage>();
    info!("tui started");

    let result = run_loop(&mut terminal, &mut app, rx, tx, client);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    info!(
        history = app.session.pipeline.history.len(),
        bookmarks = app.session.surface.bookmarks.len(),
        "tui stopped"
    );
    result
}

/// Main event loop with background message handling
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<BackgroundMessage>,
    tx: mpsc::Sender<BackgroundMessage>,
    client: AiClient,
) -> Result<()> {
    let ctx = RuntimeContext {
        tx: &tx,
        client: &client,
    };

    loop {
        app.clear_expired_toast();
        app.tick_loading();

        background::drain_messages(app, &rx);

        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| ui::render(f, app))?;

        // Short poll keeps the spinner moving
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key_event(app, key, &ctx)?;
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
