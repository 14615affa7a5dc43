use crate::surface::ActiveTab;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus, InputMode};
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn key_hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    spans.push(Span::styled(format!(" {} ", key), Theme::key_badge()));
    spans.push(Span::styled(
        format!(" {} ", label),
        Style::default().fg(Theme::GREY_500),
    ));
}

/// Key hints for the current mode and focus
fn hints(app: &App) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    match app.input_mode {
        InputMode::EditChat => {
            key_hint(&mut spans, "↵", "send");
            key_hint(&mut spans, "Esc", "done");
            return spans;
        }
        InputMode::EditInstructions => {
            key_hint(&mut spans, "↵", "newline");
            key_hint(&mut spans, "Esc", "done");
            return spans;
        }
        InputMode::Normal => {}
    }

    match app.focus {
        Focus::Files => {
            key_hint(&mut spans, "↵", "open");
            key_hint(&mut spans, "a", "add");
        }
        Focus::Instructions => {
            key_hint(&mut spans, "↵", "edit");
            key_hint(&mut spans, "t", "templates");
        }
        Focus::Chat => {
            key_hint(&mut spans, "↵", "write");
            key_hint(&mut spans, "e", "examples");
        }
        Focus::Output => {
            if app.session.surface.active == ActiveTab::History {
                key_hint(&mut spans, "[ ]", "entry");
                key_hint(&mut spans, "b", "bookmark");
            }
            key_hint(&mut spans, "1-3", "tab");
        }
    }
    key_hint(&mut spans, "?", "help");
    key_hint(&mut spans, "q", "quit");
    spans
}

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut status = vec![Span::raw("  ")];

    if app.is_loading() {
        let spinner = Theme::SPINNER[app.loading_frame % Theme::SPINNER.len()];
        status.push(Span::styled(
            format!("{} thinking  ", spinner),
            Style::default().fg(Theme::YELLOW),
        ));
    }

    let label = app
        .session
        .selection_label()
        .unwrap_or_else(|| "nothing selected".to_string());
    status.push(Span::styled(
        truncate_to_width(&label, 40),
        Style::default().fg(Theme::GREY_300),
    ));

    let hints = hints(app);
    let status_len: usize = status.iter().map(|s| s.content.chars().count()).sum();
    let hints_len: usize = hints.iter().map(|s| s.content.chars().count()).sum();
    let spacer = (area.width as usize).saturating_sub(status_len + hints_len + 1);

    let mut spans = status;
    spans.push(Span::raw(" ".repeat(spacer)));
    spans.extend(hints);

    let footer = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(Theme::GREY_900));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Session;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_hints_follow_mode() {
        let mut app = App::new(Session::default(), Config::default());
        assert!(text(&hints(&app)).contains("open"));

        app.input_mode = InputMode::EditChat;
        assert!(text(&hints(&app)).contains("send"));

        app.input_mode = InputMode::Normal;
        app.focus = Focus::Output;
        app.switch_tab(ActiveTab::History);
        assert!(text(&hints(&app)).contains("bookmark"));
    }
}
