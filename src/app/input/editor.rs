use super::submit;
use crate::app::RuntimeContext;
use crate::session::TextEdit;
use crate::ui::{App, InputMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Keys while the instructions or chat prompt field is being edited
pub(super) fn handle_editor_input(
    app: &mut App,
    key: KeyEvent,
    ctx: &RuntimeContext,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter if app.input_mode == InputMode::EditChat => submit(app, ctx),
        KeyCode::Enter => app.edit(TextEdit::Insert('\n')),
        KeyCode::Tab => app.edit(TextEdit::Insert('\t')),
        KeyCode::Backspace => app.edit(TextEdit::Backspace),
        KeyCode::Char(c) => app.edit(TextEdit::Insert(c)),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::app::messages::BackgroundMessage;
    use crate::surface::ActiveTab;
    use std::time::Duration;

    fn type_text(app: &mut App, text: &str, ctx: &RuntimeContext) {
        for c in text.chars() {
            handle_editor_input(app, key(KeyCode::Char(c)), ctx).unwrap();
        }
    }

    #[test]
    fn test_instructions_take_newlines() {
        let (tx, _rx, client) = channel_and_client();
        let ctx = RuntimeContext {
            tx: &tx,
            client: &client,
        };
        let mut app = app();
        app.start_editing(InputMode::EditInstructions);
        type_text(&mut app, "ab", &ctx);
        handle_editor_input(&mut app, key(KeyCode::Enter), &ctx).unwrap();
        type_text(&mut app, "c", &ctx);
        handle_editor_input(&mut app, key(KeyCode::Backspace), &ctx).unwrap();
        assert_eq!(app.session.pipeline.custom_instructions, "ab\n");

        handle_editor_input(&mut app, key(KeyCode::Esc), &ctx).unwrap();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_blank_prompt_enter_does_nothing() {
        let (tx, rx, client) = channel_and_client();
        let ctx = RuntimeContext {
            tx: &tx,
            client: &client,
        };
        let mut app = app();
        app.start_editing(InputMode::EditChat);
        type_text(&mut app, "   ", &ctx);
        handle_editor_input(&mut app, key(KeyCode::Enter), &ctx).unwrap();
        assert!(!app.is_loading());
        assert_eq!(app.input_mode, InputMode::EditChat);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_enter_submits_and_reports_failure() {
        let (tx, rx, client) = channel_and_client();
        let ctx = RuntimeContext {
            tx: &tx,
            client: &client,
        };
        let mut app = app();
        app.switch_tab(ActiveTab::Bookmarks);
        app.start_editing(InputMode::EditChat);
        type_text(&mut app, "Why?", &ctx);
        handle_editor_input(&mut app, key(KeyCode::Enter), &ctx).unwrap();
        assert!(app.is_loading());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.surface.active, ActiveTab::Bookmarks);

        // Second submit while in flight is refused
        app.start_editing(InputMode::EditChat);
        handle_editor_input(&mut app, key(KeyCode::Enter), &ctx).unwrap();
        assert!(app.toast.is_some());

        // No API key in the session, so the request fails fast
        let mut message = None;
        for _ in 0..200 {
            if let Ok(msg) = rx.try_recv() {
                message = Some(msg);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(matches!(message, Some(BackgroundMessage::CompletionFailed(_))));
    }
}
