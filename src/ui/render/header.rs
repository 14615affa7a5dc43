use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!("  {}", Theme::LOGO),
        Style::default()
            .fg(Theme::WHITE)
            .add_modifier(Modifier::BOLD),
    )];

    let key_state = if app.session.api_key.is_some() {
        Span::styled("   ● key set", Style::default().fg(Theme::GREEN))
    } else {
        Span::styled("   ○ no API key (s)", Style::default().fg(Theme::YELLOW))
    };
    spans.push(key_state);
    spans.push(Span::styled(
        format!("   {}", app.config.model),
        Theme::text_dim(),
    ));

    let header = Paragraph::new(vec![Line::from(spans), Line::from("")])
        .style(Style::default().bg(Theme::BG));
    frame.render_widget(header, area);
}
