use crate::session::Action;
use crate::ui::{App, Overlay};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle key events while an overlay is open
pub(super) fn handle_overlay_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.overlay {
        Overlay::Settings { .. } | Overlay::AddFiles { .. } => {
            handle_field_input(app, key);
            return Ok(());
        }
        Overlay::None => return Ok(()),
        _ => {}
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_overlay(),
        KeyCode::Char('?') if matches!(app.overlay, Overlay::Help { .. }) => app.close_overlay(),
        KeyCode::Down | KeyCode::Char('j') => app.overlay_down(),
        KeyCode::Up | KeyCode::Char('k') => app.overlay_up(),
        KeyCode::Char('T') if matches!(app.overlay, Overlay::Templates { .. }) => {
            app.dispatch(Action::ToggleTemplateTarget);
        }
        KeyCode::Char('u') if matches!(app.overlay, Overlay::Templates { .. }) => {
            app.apply_selected_template(true)
        }
        KeyCode::Enter => match app.overlay {
            Overlay::Templates { .. } => app.apply_selected_template(false),
            Overlay::ChatExamples { .. } => app.use_selected_example(),
            _ => app.close_overlay(),
        },
        _ => {}
    }
    Ok(())
}

/// Single text field overlays: every printable key is text
fn handle_field_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => {
            if matches!(app.overlay, Overlay::Settings { .. }) {
                app.save_settings();
            } else {
                app.submit_add_files();
            }
        }
        KeyCode::Backspace => {
            if let Overlay::Settings { input } | Overlay::AddFiles { input } = &mut app.overlay {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Overlay::Settings { input } | Overlay::AddFiles { input } = &mut app.overlay {
                input.push(c);
            }
        }
        _ => {}
    }
}
