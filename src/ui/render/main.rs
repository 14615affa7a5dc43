use crate::session::Session;
use crate::surface::ActiveTab;
use crate::tree::TreeRow;
use crate::ui::helpers::{follow_offset, wrap_text};
use crate::ui::markdown::render_markup;
use crate::ui::theme::Theme;
use crate::ui::{App, Focus, InputMode};
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

const CURSOR: &str = "▏";

pub(super) fn render_main(frame: &mut Frame, columns: [Rect; 3], app: &App) {
    let [files, composer, tabs] = columns;
    render_files(frame, files, app);
    render_composer(frame, composer, app);
    render_tabs(frame, tabs, app);
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(if focused {
            Theme::title()
        } else {
            Theme::text_dim()
        })
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_active()
        } else {
            Theme::border()
        })
}

// ═══════════════════════════════════════════════════════════════════════════
//  FILES
// ═══════════════════════════════════════════════════════════════════════════

fn render_files(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Files && app.input_mode == InputMode::Normal;
    let block = panel("FILES", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.session.rows();
    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  No files", Theme::text_dim())),
            Line::from(Span::styled("  press a to add", Theme::text_dim())),
        ]);
        frame.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let cursor = app.session.tree.cursor;
    let offset = follow_offset(cursor, height);
    let width = inner.width as usize;

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, row)| tree_line(row, focused && i == cursor, width))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn tree_line(row: &TreeRow, under_cursor: bool, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let glyph = row.icon.glyph();
    let used = indent.chars().count() + glyph.chars().count() + 2;
    let name = truncate_to_width(&row.name, width.saturating_sub(used));

    let mut name_style = if row.selected {
        Style::default()
            .fg(Theme::WHITE)
            .add_modifier(Modifier::BOLD)
    } else {
        Theme::text()
    };
    let mut glyph_style = Style::default().fg(Theme::icon_color(row.icon));
    if under_cursor {
        name_style = name_style.bg(Theme::GREY_700);
        glyph_style = glyph_style.bg(Theme::GREY_700);
    }

    Line::from(vec![
        Span::raw(format!(" {}", indent)),
        Span::styled(glyph.to_string(), glyph_style),
        Span::styled(format!(" {}", name), name_style),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════
//  COMPOSER
// ═══════════════════════════════════════════════════════════════════════════

fn render_composer(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let pipeline = &app.session.pipeline;

    let editing = app.input_mode == InputMode::EditInstructions;
    render_editor(
        frame,
        layout[0],
        &format!("INSTRUCTIONS · templates → {}", pipeline.template_target.label()),
        &pipeline.custom_instructions,
        app.focus == Focus::Instructions,
        editing,
        "i to edit · t templates",
    );

    let personality = Paragraph::new(Line::from(vec![
        Span::styled(" ‹ ", Theme::text_dim()),
        Span::styled(pipeline.personality.name(), Theme::title()),
        Span::styled(" › ", Theme::text_dim()),
    ]))
    .block(panel("PERSONALITY p/P", false));
    frame.render_widget(personality, layout[1]);

    let title = if pipeline.is_submitting() {
        let frame_idx = app.loading_frame % Theme::SPINNER.len();
        format!("PROMPT {} sending", Theme::SPINNER[frame_idx])
    } else {
        "PROMPT".to_string()
    };
    render_editor(
        frame,
        layout[2],
        &title,
        &pipeline.chat_prompt,
        app.focus == Focus::Chat,
        app.input_mode == InputMode::EditChat,
        "c to write · e examples · ↵ send",
    );
}

fn render_editor(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    focused: bool,
    editing: bool,
    hint: &str,
) {
    let block = panel(title, focused || editing);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if text.is_empty() && !editing {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            format!(" {}", hint),
            Theme::text_dim().add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(placeholder, inner);
        return;
    }

    let width = (inner.width as usize).saturating_sub(1);
    let mut wrapped = wrap_text(text, width);
    if editing {
        if let Some(last) = wrapped.last_mut() {
            last.push_str(CURSOR);
        }
    }

    // Keep the end of the text, where the cursor is, in view
    let height = inner.height as usize;
    let skip = wrapped.len().saturating_sub(height);
    let lines: Vec<Line> = wrapped
        .into_iter()
        .skip(skip)
        .map(|l| Line::from(Span::styled(format!(" {}", l), Theme::text())))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

// ═══════════════════════════════════════════════════════════════════════════
//  TABS
// ═══════════════════════════════════════════════════════════════════════════

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Output;
    let block = panel("1 2 3", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let surface = &app.session.surface;
    let titles: Vec<Line> = ActiveTab::all()
        .iter()
        .map(|tab| {
            let label = match tab {
                ActiveTab::History => {
                    format!("{} ({})", tab.label(), app.session.pipeline.history.len())
                }
                ActiveTab::Bookmarks => format!("{} ({})", tab.label(), surface.bookmarks.len()),
                ActiveTab::Output => tab.label().to_string(),
            };
            Line::from(label)
        })
        .collect();
    let selected = ActiveTab::all()
        .iter()
        .position(|t| *t == surface.active)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Theme::text_dim())
        .highlight_style(
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("·", Theme::text_dim()));
    frame.render_widget(tabs, layout[0]);

    let width = layout[1].width as usize;
    let (mut lines, starts) = tab_content(&app.session, surface.active, width);

    if surface.active == ActiveTab::History && focused {
        if let Some(start) = starts.get(surface.history_cursor) {
            if let Some(line) = lines.get_mut(*start) {
                *line = line.clone().style(Style::default().bg(Theme::GREY_700));
            }
        }
    }

    let scroll = surface
        .scroll(surface.active)
        .min(lines.len().saturating_sub(1));
    let body = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(body, layout[1]);
}

/// Lines of one tab at `width`, plus the first line of each entry
/// (history entries or bookmarks)
pub fn tab_content(
    session: &Session,
    tab: ActiveTab,
    width: usize,
) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines: Vec<Line<'static>> = vec![Line::from("")];
    let mut starts = Vec::new();

    match tab {
        ActiveTab::Output => {
            let response = &session.pipeline.ai_response;
            if response.trim().is_empty() {
                lines.push(placeholder("Responses appear here."));
            } else {
                lines.extend(render_markup(response, width));
            }
        }
        ActiveTab::History => {
            if session.pipeline.history.is_empty() {
                lines.push(placeholder("No history yet."));
            }
            for (i, entry) in session.pipeline.history.iter().enumerate() {
                starts.push(lines.len());
                lines.push(Line::from(vec![
                    Span::styled(format!("Prompt {}", i + 1), Theme::title()),
                    Span::styled(
                        format!("  {}", entry.answered_at.format("%H:%M:%S")),
                        Theme::text_dim(),
                    ),
                ]));
                for prompt_line in entry.prompt.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("› {}", truncate_to_width(prompt_line, width.saturating_sub(2))),
                        Style::default().fg(Theme::GREY_300),
                    )));
                }
                lines.extend(render_markup(&entry.response, width));
                lines.push(separator(width));
            }
        }
        ActiveTab::Bookmarks => {
            if session.surface.bookmarks.is_empty() {
                lines.push(placeholder("No bookmarks yet. Press b on a history entry."));
            }
            for bookmark in &session.surface.bookmarks {
                starts.push(lines.len());
                lines.push(Line::from(vec![
                    Span::styled("★ ", Style::default().fg(Theme::YELLOW)),
                    Span::styled(bookmark.id.clone(), Theme::text_dim()),
                ]));
                lines.extend(render_markup(&bookmark.content, width));
                lines.push(separator(width));
            }
        }
    }

    (lines, starts)
}

fn placeholder(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Theme::text_dim().add_modifier(Modifier::ITALIC),
    ))
}

fn separator(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(width.min(60)),
        Style::default().fg(Theme::GREY_600),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Action, TextEdit};

    fn answered(session: &mut Session, prompt: &str, answer: &str) {
        session.update(Action::EditChatPrompt(TextEdit::Replace(prompt.to_string())));
        session.update(Action::Submit);
        session.update(Action::Completed(Ok(answer.to_string())));
    }

    #[test]
    fn test_history_starts_point_at_headers() {
        let mut session = Session::default();
        answered(&mut session, "one", "a");
        answered(&mut session, "two", "b");
        let (lines, starts) = tab_content(&session, ActiveTab::History, 40);
        assert_eq!(starts.len(), 2);
        for (i, start) in starts.iter().enumerate() {
            let header: String = lines[*start]
                .spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect();
            assert!(header.starts_with(&format!("Prompt {}", i + 1)));
        }
    }

    #[test]
    fn test_bookmark_tab_lists_copies() {
        let mut session = Session::default();
        answered(&mut session, "one", "saved answer");
        session.update(Action::Bookmark(0));
        let (lines, starts) = tab_content(&session, ActiveTab::Bookmarks, 40);
        assert_eq!(starts.len(), 1);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("saved answer"));
        assert!(text.contains(&session.surface.bookmarks[0].id));
    }
}
