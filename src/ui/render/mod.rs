mod footer;
mod header;
mod main;
mod overlays;
mod toast;

use crate::ui::theme::Theme;
use crate::ui::{App, Overlay};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use footer::render_footer;
use header::render_header;
use main::render_main;
use overlays::{
    render_add_files, render_chat_examples, render_help, render_settings, render_templates,
};
use toast::render_toast;

pub use main::tab_content;

/// Header, body and footer rows of the screen
fn rows(area: Rect) -> [Rect; 3] {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Logo
            Constraint::Min(8),    // Columns
            Constraint::Length(2), // Status and keys
        ])
        .split(area);
    [layout[0], layout[1], layout[2]]
}

/// Files, composer and tabs columns for a full-screen `area`
pub(crate) fn columns(area: Rect) -> [Rect; 3] {
    let body = rows(area)[1];
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(24),
            Constraint::Percentage(36),
            Constraint::Percentage(40),
        ])
        .split(body);
    [layout[0], layout[1], layout[2]]
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let [header, _, footer] = rows(area);
    render_header(frame, header, app);
    render_main(frame, columns(area), app);
    render_footer(frame, footer, app);

    match &app.overlay {
        Overlay::Help { scroll } => render_help(frame, *scroll),
        Overlay::Settings { input } => render_settings(frame, input, &app.config),
        Overlay::Templates { selected } => {
            render_templates(frame, *selected, app.session.pipeline.template_target)
        }
        Overlay::ChatExamples { selected } => render_chat_examples(frame, *selected),
        Overlay::AddFiles { input } => render_add_files(frame, input),
        Overlay::None => {}
    }

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::{Action, Session, TextEdit};
    use crate::surface::ActiveTab;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(Session::default(), Config::default())
    }

    #[test]
    fn test_columns_split_body() {
        let [files, composer, tabs] = columns(Rect::new(0, 0, 100, 30));
        assert_eq!(files.y, 2);
        assert_eq!(files.height, 26);
        assert_eq!(files.width + composer.width + tabs.width, 100);
    }

    #[test]
    fn test_render_initial_screen() {
        let screen = draw(&app());
        assert!(screen.contains(Theme::LOGO));
        assert!(screen.contains("Documents"));
        assert!(screen.contains("README.md"));
        assert!(screen.contains("Code Reviewer"));
        assert!(screen.contains("Output"));
        assert!(screen.contains("Bookmarks"));
    }

    #[test]
    fn test_render_expanded_tree_and_selection() {
        let mut app = app();
        app.dispatch(Action::Activate(vec![0]));
        app.dispatch(Action::Activate(vec![0, 2]));
        let screen = draw(&app);
        assert!(screen.contains("meeting-notes.md"));
        assert!(screen.contains("Documents/Notes"));
    }

    #[test]
    fn test_render_response_and_history() {
        let mut app = app();
        app.dispatch(Action::EditChatPrompt(TextEdit::Replace("Explain".to_string())));
        app.dispatch(Action::Submit);
        app.dispatch(Action::Completed(Ok("```js\nconsole.log(1)\n```".to_string())));
        let screen = draw(&app);
        assert!(screen.contains("console.log(1)"));

        app.switch_tab(ActiveTab::History);
        let screen = draw(&app);
        assert!(screen.contains("Prompt 1"));
        assert!(screen.contains("Explain"));
    }

    #[test]
    fn test_render_overlays() {
        let mut app = app();
        for overlay in [
            Overlay::Help { scroll: 0 },
            Overlay::Settings {
                input: "sk-secret".to_string(),
            },
            Overlay::Templates { selected: 0 },
            Overlay::ChatExamples { selected: 0 },
            Overlay::AddFiles {
                input: String::new(),
            },
        ] {
            app.overlay = overlay;
            let screen = draw(&app);
            assert!(!screen.contains("sk-secret"));
        }
        app.overlay = Overlay::Templates { selected: 0 };
        assert!(draw(&app).contains("Prompt Guide"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = app();
        app.overlay = Overlay::Help { scroll: 100 };
        app.show_toast("+ Added 3 files");
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
