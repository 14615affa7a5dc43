use crate::config::Config;
use crate::files::ACCEPTED_EXTENSIONS;
use crate::pipeline::templates;
use crate::pipeline::TemplateTarget;
use crate::ui::helpers::{centered_rect, follow_offset};
use crate::ui::theme::Theme;
use crate::util::{first_line, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn overlay_block(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Theme::GREY_100))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::GREY_400))
        .style(Style::default().bg(Theme::GREY_900))
}

fn open_overlay(frame: &mut Frame, percent_x: u16, percent_y: u16, title: &str) -> Rect {
    let area = centered_rect(percent_x, percent_y, frame.area());
    frame.render_widget(Clear, area);
    let block = overlay_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn key_row(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("    │  ".to_string(), Style::default().fg(Theme::GREY_600)),
        Span::styled(
            format!(" {} ", key),
            Style::default().fg(Theme::GREY_900).bg(Theme::GREY_300),
        ),
        Span::styled(format!("  {}", desc), Style::default().fg(Theme::GREY_200)),
    ])
}

fn section(title: &str, rows: &[(&str, &str)]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("    ╭─ ".to_string(), Style::default().fg(Theme::GREY_600)),
            Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Theme::WHITE)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    lines.extend(rows.iter().map(|(key, desc)| key_row(key, desc)));
    lines.push(Line::from(Span::styled(
        "    ╰─".to_string(),
        Style::default().fg(Theme::GREY_600),
    )));
    lines
}

pub(super) fn render_help(frame: &mut Frame, scroll: usize) {
    let inner = open_overlay(frame, 55, 80, "Help");

    let mut help_text: Vec<Line<'static>> = Vec::new();
    help_text.extend(section(
        "Navigation",
        &[
            ("Tab", "Next panel"),
            ("↑↓ jk", "Move / scroll"),
            ("↵ ␣", "Open folder, select file, edit field"),
            ("Esc", "Leave editor / close"),
        ],
    ));
    help_text.extend(section(
        "Prompting",
        &[
            ("i", "Edit instructions"),
            ("c", "Write chat prompt"),
            ("↵", "Send prompt (while writing)"),
            ("p P", "Next / previous personality"),
            ("t", "Template catalog"),
            ("T", "Toggle template target"),
            ("e", "Chat examples"),
        ],
    ));
    help_text.extend(section(
        "Results",
        &[
            ("1 2 3", "Output / History / Bookmarks"),
            ("[ ]", "Previous / next history entry"),
            ("b", "Bookmark history entry"),
        ],
    ));
    help_text.extend(section(
        "Session",
        &[
            ("a", "Add files"),
            ("s", "API key"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    ));

    let start = scroll.min(help_text.len().saturating_sub(1));
    let visible: Vec<Line> = help_text
        .into_iter()
        .skip(start)
        .take(inner.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

pub(super) fn render_settings(frame: &mut Frame, input: &str, config: &Config) {
    let inner = open_overlay(frame, 60, 40, "Settings");

    let masked = "•".repeat(input.chars().count().min(48));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  API Key", Theme::title())),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                format!(" {}▏", masked),
                Style::default().fg(Theme::GREY_100).bg(Theme::GREY_700),
            ),
        ]),
        Line::from(Span::styled(
            "  Kept in memory for this session only.",
            Theme::text_dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  model     ", Theme::text_dim()),
            Span::styled(config.model.clone(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled("  endpoint  ", Theme::text_dim()),
            Span::styled(
                truncate_to_width(&config.endpoint, (inner.width as usize).saturating_sub(12)),
                Theme::text(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  config    ", Theme::text_dim()),
            Span::styled(Config::config_location(), Theme::text()),
        ]),
        Line::from(""),
        Line::from(Span::styled("  ↵ save   Esc cancel", Theme::text_dim())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Selectable list rows with a short preview of each entry
fn list_lines(items: &[(&str, &str)], selected: usize, width: usize) -> Vec<Line<'static>> {
    items
        .iter()
        .enumerate()
        .flat_map(|(i, (title, preview))| {
            let is_selected = i == selected;
            let marker = if is_selected { " › " } else { "   " };
            let title_style = if is_selected {
                Theme::title().bg(Theme::GREY_700)
            } else {
                Theme::text()
            };
            vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Theme::WHITE)),
                    Span::styled(title.to_string(), title_style),
                ]),
                Line::from(Span::styled(
                    format!(
                        "     {}",
                        truncate_to_width(first_line(preview), width.saturating_sub(6))
                    ),
                    Theme::text_dim(),
                )),
            ]
        })
        .collect()
}

pub(super) fn render_templates(frame: &mut Frame, selected: usize, target: TemplateTarget) {
    let inner = open_overlay(frame, 60, 70, "Templates");
    let catalog = templates::catalog();
    let items: Vec<(&str, &str)> = catalog.iter().map(|t| (t.title, t.body)).collect();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  applies to ", Theme::text_dim()),
            Span::styled(target.label(), Style::default().fg(Theme::YELLOW)),
            Span::styled("   (T to switch)", Theme::text_dim()),
        ]),
        Line::from(""),
    ];
    let list = list_lines(&items, selected, inner.width as usize);
    let height = (inner.height as usize).saturating_sub(4);
    let offset = follow_offset(selected * 2 + 1, height);
    lines.extend(list.into_iter().skip(offset).take(height));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  ↵ apply   u use as instructions   Esc close",
        Theme::text_dim(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(super) fn render_chat_examples(frame: &mut Frame, selected: usize) {
    let inner = open_overlay(frame, 60, 50, "Chat examples");
    let items: Vec<(&str, &str)> = templates::CHAT_EXAMPLES
        .iter()
        .map(|e| (e.title, e.content))
        .collect();

    let mut lines = vec![Line::from("")];
    lines.extend(list_lines(&items, selected, inner.width as usize));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  ↵ use   Esc close",
        Theme::text_dim(),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

pub(super) fn render_add_files(frame: &mut Frame, input: &str) {
    let inner = open_overlay(frame, 60, 30, "Add files");
    let field_width = (inner.width as usize).saturating_sub(6);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  File paths, comma separated",
            Theme::text(),
        )),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {}▏", truncate_to_width(input, field_width)),
                Style::default().fg(Theme::GREY_100).bg(Theme::GREY_700),
            ),
        ]),
        Line::from(Span::styled(
            format!("  Suggested types: {}", ACCEPTED_EXTENSIONS),
            Theme::text_dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("  ↵ add   Esc cancel", Theme::text_dim())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
