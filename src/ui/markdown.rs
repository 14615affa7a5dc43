//! Markup to ratatui styled text
//!
//! Handles the tagged blocks written by the response formatter plus the
//! common markdown elements (headings, lists, quotes, fences, inline
//! bold/italic/code). Input is trusted and rendered as-is.

use super::theme::Theme;
use crate::pipeline::{parse_blocks, Block, Role};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Render response text into styled lines no wider than `max_width`
pub fn render_markup(text: &str, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in parse_blocks(text) {
        match block {
            Block::Text(body) => lines.extend(render_markdown(body.trim_matches('\n'), max_width)),
            Block::Code { lang, body } => lines.extend(render_code(&lang, &body)),
            Block::Turn { role, content } => {
                lines.extend(render_turn(role, &content, max_width))
            }
        }
    }
    lines
}

/// Classification of one markdown source line
enum LineKind<'a> {
    Blank,
    Heading(usize, &'a str),
    Bullet(&'a str),
    Numbered(&'a str, &'a str),
    Quote(&'a str),
    Paragraph(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    for (level, marker) in [(3, "### "), (2, "## "), (1, "# ")] {
        if let Some(rest) = line.strip_prefix(marker) {
            return LineKind::Heading(level, rest);
        }
    }
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineKind::Bullet(rest);
    }
    if let Some(rest) = line.strip_prefix("> ") {
        return LineKind::Quote(rest);
    }
    if let Some(dot) = line.find(". ") {
        let number = &line[..dot];
        if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
            return LineKind::Numbered(number, &line[dot + 2..]);
        }
    }
    LineKind::Paragraph(line)
}

/// Render plain markdown. Fenced code is shown verbatim.
pub fn render_markdown(text: &str, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut fence: Option<String> = None;
    let mut fenced = String::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("```") {
            match fence.take() {
                Some(lang) => {
                    lines.extend(render_code(&lang, &fenced));
                    fenced.clear();
                }
                None => fence = Some(rest.trim().to_string()),
            }
            continue;
        }
        if fence.is_some() {
            fenced.push_str(line);
            fenced.push('\n');
            continue;
        }

        match classify(line) {
            LineKind::Blank => lines.push(Line::from("")),
            LineKind::Heading(level, content) => lines.push(render_heading(level, content)),
            LineKind::Bullet(content) => {
                lines.extend(prefixed(content, "  • ", "    ", max_width));
            }
            LineKind::Numbered(number, content) => {
                let first = format!("  {}. ", number);
                let rest = " ".repeat(first.width());
                lines.extend(prefixed(content, &first, &rest, max_width));
            }
            LineKind::Quote(content) => {
                lines.extend(prefixed(content, "  │ ", "  │ ", max_width));
            }
            LineKind::Paragraph(content) => lines.extend(wrap_inline(content, max_width)),
        }
    }

    // An unterminated fence still shows its content
    if let Some(lang) = fence {
        lines.extend(render_code(&lang, &fenced));
    }
    lines
}

fn render_heading(level: usize, text: &str) -> Line<'static> {
    let (content, color) = match level {
        1 => (text.to_string(), Theme::WHITE),
        2 => (text.to_string(), Theme::GREY_100),
        _ => (format!("• {}", text), Theme::GREY_200),
    };
    Line::from(Span::styled(
        content,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn render_code(lang: &str, body: &str) -> Vec<Line<'static>> {
    let label = if lang.is_empty() { "text" } else { lang };
    let mut lines = vec![Line::from(Span::styled(
        format!("  ┌ {}", label),
        Style::default().fg(Theme::GREY_400),
    ))];
    let code_style = Style::default().fg(Theme::GREY_200).bg(Theme::GREY_800);
    for code_line in body.trim_end_matches('\n').lines() {
        lines.push(Line::from(vec![
            Span::styled("  │ ", Style::default().fg(Theme::GREY_500)),
            Span::styled(code_line.to_string(), code_style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "  └",
        Style::default().fg(Theme::GREY_500),
    )));
    lines
}

fn render_turn(role: Role, content: &[Block], max_width: usize) -> Vec<Line<'static>> {
    let (badge, color) = match role {
        Role::User => ("👤 ", Theme::BLUE),
        Role::Assistant => ("🤖 ", Theme::GREEN),
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(badge),
        Span::styled(
            format!("{}:", role.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];
    for block in content {
        match block {
            Block::Text(body) => {
                for paragraph in body.trim_matches('\n').lines() {
                    lines.extend(prefixed(paragraph, "   ", "   ", max_width));
                }
            }
            Block::Code { lang, body } => {
                lines.extend(render_code(lang, body).into_iter().map(indented))
            }
            Block::Turn { role, content } => lines.extend(
                render_turn(*role, content, max_width.saturating_sub(3))
                    .into_iter()
                    .map(indented),
            ),
        }
    }
    lines
}

fn indented(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Wrap `content` to fit after a prefix; the first line gets `first`
fn prefixed(content: &str, first: &str, rest: &str, max_width: usize) -> Vec<Line<'static>> {
    let width = max_width.saturating_sub(first.width());
    wrap_inline(content, width)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { first } else { rest };
            let mut spans = vec![Span::styled(
                prefix.to_string(),
                Style::default().fg(Theme::GREY_400),
            )];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

fn wrap_inline(text: &str, max_width: usize) -> Vec<Line<'static>> {
    wrap_words(text, max_width)
        .iter()
        .map(|line| parse_inline(line))
        .collect()
}

/// Greedy word wrap by display width
fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Inline emphasis: `**bold**`, `__bold__`, `*italic*`, `_italic_`, `` `code` ``
fn parse_inline(text: &str) -> Line<'static> {
    let plain = Style::default().fg(Theme::GREY_100);
    let bold = Style::default()
        .fg(Theme::WHITE)
        .add_modifier(Modifier::BOLD);
    let italic = Style::default()
        .fg(Theme::GREY_200)
        .add_modifier(Modifier::ITALIC);
    let code = Style::default().fg(Theme::GREY_200).bg(Theme::GREY_800);

    let chars: Vec<char> = text.chars().collect();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut pending = String::new();
    let mut i = 0;

    let flush = |pending: &mut String, spans: &mut Vec<Span<'static>>| {
        if !pending.is_empty() {
            spans.push(Span::styled(std::mem::take(pending), plain));
        }
    };

    while i < chars.len() {
        let c = chars[i];
        let doubled = i + 1 < chars.len() && chars[i + 1] == c;

        let (marker_len, style) = match c {
            '`' => (1, code),
            '*' | '_' if doubled => (2, bold),
            '*' | '_' => (1, italic),
            _ => {
                pending.push(c);
                i += 1;
                continue;
            }
        };

        match find_closing(&chars, i + marker_len, c, marker_len) {
            Some(end) if end > i + marker_len => {
                flush(&mut pending, &mut spans);
                let inner: String = chars[i + marker_len..end].iter().collect();
                spans.push(Span::styled(inner, style));
                i = end + marker_len;
            }
            _ => {
                pending.push(c);
                i += 1;
            }
        }
    }
    flush(&mut pending, &mut spans);

    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    Line::from(spans)
}

fn find_closing(chars: &[char], from: usize, marker: char, len: usize) -> Option<usize> {
    let mut j = from;
    while j + len <= chars.len() {
        if chars[j..j + len].iter().all(|c| *c == marker) {
            return Some(j);
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::format_response;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_heading() {
        let lines = render_markdown("# Hello World", 80);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "Hello World");
    }

    #[test]
    fn test_bold_and_code_spans() {
        let line = parse_inline("This is **bold** and `code`");
        let texts: Vec<_> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, vec!["This is ", "bold", " and ", "code"]);
    }

    #[test]
    fn test_unclosed_marker_is_literal() {
        let line = parse_inline("2 * 3 = 6");
        assert_eq!(text_of(&line), "2 * 3 = 6");
    }

    #[test]
    fn test_lists() {
        let lines = render_markdown("- Item 1\n- Item 2\n1. First", 80);
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[0]), "  • Item 1");
        assert_eq!(text_of(&lines[2]), "  1. First");
    }

    #[test]
    fn test_wrapping_respects_width() {
        let lines = render_markdown("one two three four five six", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_of(l).width() <= 10));
    }

    #[test]
    fn test_code_block_from_formatter() {
        let lines = render_markup(&format_response("```js\nconsole.log(1)\n```"), 80);
        let rendered: Vec<_> = lines.iter().map(text_of).collect();
        assert_eq!(rendered, vec!["  ┌ js", "  │ console.log(1)", "  └"]);
    }

    #[test]
    fn test_turns_from_formatter() {
        let lines = render_markup(&format_response("User: hi\nAssistant: hello"), 80);
        let rendered: Vec<_> = lines.iter().map(text_of).collect();
        assert_eq!(
            rendered,
            vec!["👤 User:", "   hi", "🤖 Assistant:", "   hello"]
        );
    }

    #[test]
    fn test_turn_keeps_its_code_block() {
        let raw = "User: fix this\n```rust\nfn main() {}\n```\nAssistant: done";
        let lines = render_markup(&format_response(raw), 80);
        let rendered: Vec<_> = lines.iter().map(text_of).collect();
        assert_eq!(
            rendered,
            vec![
                "👤 User:",
                "   fix this",
                "     ┌ rust",
                "     │ fn main() {}",
                "     └",
                "🤖 Assistant:",
                "   done",
            ]
        );
    }

    #[test]
    fn test_raw_fence_is_shown_not_dropped() {
        let lines = render_markdown("```\nplain\n", 80);
        assert!(lines.iter().any(|l| text_of(l).contains("plain")));
    }
}
