use crate::session::Action;
use crate::surface::ActiveTab;
use crate::ui::{App, Focus, InputMode, Overlay};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle key events in normal mode (no overlay, no field being edited)
pub(super) fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Char('?') => app.overlay = Overlay::Help { scroll: 0 },
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('a') => {
            app.overlay = Overlay::AddFiles {
                input: String::new(),
            }
        }
        KeyCode::Char('t') => app.overlay = Overlay::Templates { selected: 0 },
        KeyCode::Char('e') => app.overlay = Overlay::ChatExamples { selected: 0 },
        KeyCode::Char('T') => {
            app.dispatch(Action::ToggleTemplateTarget);
            let target = app.session.pipeline.template_target.label();
            app.show_toast(&format!("Templates now apply to {}", target));
        }
        KeyCode::Char('p') => app.cycle_personality(true),
        KeyCode::Char('P') => app.cycle_personality(false),
        KeyCode::Char('i') => app.start_editing(InputMode::EditInstructions),
        KeyCode::Char('c') => app.start_editing(InputMode::EditChat),
        KeyCode::Char('1') => show_tab(app, ActiveTab::Output),
        KeyCode::Char('2') => show_tab(app, ActiveTab::History),
        KeyCode::Char('3') => show_tab(app, ActiveTab::Bookmarks),
        KeyCode::Char('[') => app.move_history_cursor(false),
        KeyCode::Char(']') => app.move_history_cursor(true),
        KeyCode::Char('b') => app.bookmark_cursor(),
        KeyCode::Down | KeyCode::Char('j') => navigate_down(app),
        KeyCode::Up | KeyCode::Char('k') => navigate_up(app),
        KeyCode::Home | KeyCode::Char('g') => navigate_home(app),
        KeyCode::End | KeyCode::Char('G') => navigate_end(app),
        KeyCode::PageDown => {
            for _ in 0..10 {
                navigate_down(app);
            }
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                navigate_up(app);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => activate(app),
        _ => {}
    }
    Ok(())
}

fn show_tab(app: &mut App, tab: ActiveTab) {
    app.switch_tab(tab);
    app.focus = Focus::Output;
}

fn navigate_down(app: &mut App) {
    match app.focus {
        Focus::Files => app.tree_down(),
        Focus::Output => app.scroll_down(),
        Focus::Instructions | Focus::Chat => {}
    }
}

fn navigate_up(app: &mut App) {
    match app.focus {
        Focus::Files => app.tree_up(),
        Focus::Output => app.scroll_up(),
        Focus::Instructions | Focus::Chat => {}
    }
}

fn navigate_home(app: &mut App) {
    match app.focus {
        Focus::Files => app.session.tree.cursor_home(),
        Focus::Output => app.session.surface.scroll_home(),
        Focus::Instructions | Focus::Chat => {}
    }
}

fn navigate_end(app: &mut App) {
    if app.focus == Focus::Files {
        let rows = app.session.rows().len();
        app.session.tree.cursor_end(rows);
    }
}

fn activate(app: &mut App) {
    match app.focus {
        Focus::Files => app.activate_cursor(),
        Focus::Instructions => app.start_editing(InputMode::EditInstructions),
        Focus::Chat => app.start_editing(InputMode::EditChat),
        Focus::Output => {
            let next = app.session.surface.active.next();
            app.switch_tab(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::pipeline::{Personality, TemplateTarget};

    fn press(app: &mut App, code: KeyCode) {
        handle_normal_mode(app, key(code)).unwrap();
    }

    #[test]
    fn test_tree_navigation_and_activation() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.session.tree.is_open(&[0]));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.selected_path, vec!["Documents", "data.json"]);
        // Selecting a file leaves folder state alone
        assert!(app.session.tree.is_open(&[0]));
        assert_eq!(app.session.tree.open_count(), 1);

        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.session.tree.cursor, 4);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.session.tree.cursor, 0);
    }

    #[test]
    fn test_enter_on_composer_starts_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Instructions);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::EditInstructions);
    }

    #[test]
    fn test_personality_cycles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session.pipeline.personality, Personality::Architect);
        press(&mut app, KeyCode::Char('P'));
        press(&mut app, KeyCode::Char('P'));
        assert_eq!(
            app.session.pipeline.personality,
            Personality::DocumentationWriter
        );
    }

    #[test]
    fn test_tab_keys_and_target_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.surface.active, ActiveTab::Bookmarks);
        assert_eq!(app.focus, Focus::Output);

        press(&mut app, KeyCode::Char('T'));
        assert_eq!(
            app.session.pipeline.template_target,
            TemplateTarget::Analysis
        );
    }

    #[test]
    fn test_overlay_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.overlay, Overlay::Templates { selected: 0 });
        app.close_overlay();
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.overlay, Overlay::AddFiles { .. }));
    }

    #[test]
    fn test_bookmark_without_history_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.session.surface.bookmarks.is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
