//! Response formatting
//!
//! Raw completions are rewritten into a small tagged markup before they are
//! stored. Fenced code becomes `<pre lang="..">..</pre>` and conversation
//! turns become `<role name="..">..</role>`. [`parse_blocks`] reads the
//! markup back for the renderer.

use regex::Regex;
use std::sync::OnceLock;

/// Language tag used when a fence has none
pub const DEFAULT_LANG: &str = "text";

fn code_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(\w+)?\n([\s\S]*?)```").expect("valid code fence regex"))
}

fn role_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(User|Assistant):\s*").expect("valid role regex"))
}

fn role_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<role name="(User|Assistant)">(.*?)</role>"#).expect("valid role block regex")
    })
}

fn pre_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<pre lang="([^"]*)">"#).expect("valid pre regex"))
}

const PRE_CLOSE: &str = "</pre>";

/// Speaker of a conversation block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "User" => Some(Role::User),
            "Assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// A piece of formatted response text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Plain markdown
    Text(String),
    Code { lang: String, body: String },
    /// A conversation turn; its content may hold code blocks
    Turn { role: Role, content: Vec<Block> },
}

/// Rewrite a raw completion into tagged markup.
///
/// Code fences are rewritten first. Role labels are then rewritten over the
/// whole result: each `User:` or `Assistant:` starts a turn that runs up to
/// the next label or the end of the text, code blocks included.
pub fn format_response(raw: &str) -> String {
    let with_code = code_fence_re().replace_all(raw, |caps: &regex::Captures| {
        let lang = caps.get(1).map(|m| m.as_str()).unwrap_or(DEFAULT_LANG);
        format!("<pre lang=\"{}\">{}</pre>", lang, &caps[2])
    });
    format_turns(&with_code)
}

fn format_turns(text: &str) -> String {
    let labels: Vec<regex::Captures> = role_label_re().captures_iter(text).collect();
    if labels.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + labels.len() * 32);
    let first = labels[0].get(0).map(|m| m.start()).unwrap_or(0);
    out.push_str(&text[..first]);

    for (i, caps) in labels.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let end = labels
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        out.push_str(&format!(
            "<role name=\"{}\">{}</role>\n",
            &caps[1],
            text[whole.end()..end].trim()
        ));
    }
    out
}

/// Split formatted text back into blocks, in order.
///
/// Turns are split out first and code is parsed inside each piece. A code
/// block cut by a turn boundary (a label inside a fence) continues into the
/// next piece.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut open_code: Option<String> = None;
    let mut last = 0;

    for caps in role_block_re().captures_iter(text) {
        let (Some(whole), Some(label), Some(content)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        blocks.extend(parse_segment(&text[last..whole.start()], &mut open_code));
        if let Some(role) = Role::from_label(label.as_str()) {
            blocks.push(Block::Turn {
                role,
                content: parse_segment(content.as_str(), &mut open_code),
            });
        }
        last = whole.end();
    }
    blocks.extend(parse_segment(&text[last..], &mut open_code));
    blocks
}

/// Parse text and code out of one piece. `open_code` carries the language
/// of a code block left open at the end of the previous piece.
fn parse_segment(text: &str, open_code: &mut Option<String>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut rest = text;

    loop {
        if let Some(lang) = open_code.take() {
            match rest.find(PRE_CLOSE) {
                Some(end) => {
                    blocks.push(Block::Code {
                        lang,
                        body: rest[..end].to_string(),
                    });
                    rest = &rest[end + PRE_CLOSE.len()..];
                }
                None => {
                    if !rest.is_empty() {
                        blocks.push(Block::Code {
                            lang: lang.clone(),
                            body: rest.to_string(),
                        });
                    }
                    *open_code = Some(lang);
                    return blocks;
                }
            }
        }

        let Some(caps) = pre_open_re().captures(rest) else {
            push_text(&mut blocks, rest);
            return blocks;
        };
        let (Some(whole), Some(lang)) = (caps.get(0), caps.get(1)) else {
            push_text(&mut blocks, rest);
            return blocks;
        };
        push_text(&mut blocks, &rest[..whole.start()]);
        *open_code = Some(lang.as_str().to_string());
        rest = &rest[whole.end()..];
    }
}

fn push_text(blocks: &mut Vec<Block>, text: &str) {
    if !text.trim().is_empty() {
        blocks.push(Block::Text(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(body: &str) -> Block {
        Block::Text(body.to_string())
    }

    fn tagged(text: &str) -> Vec<Block> {
        parse_blocks(text)
            .into_iter()
            .filter(|b| !matches!(b, Block::Text(_)))
            .collect()
    }

    #[test]
    fn test_code_fence_with_language() {
        let formatted = format_response("```js\nconsole.log(1)\n```");
        assert_eq!(formatted, "<pre lang=\"js\">console.log(1)\n</pre>");

        let blocks = parse_blocks(&formatted);
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { lang, body } => {
                assert_eq!(lang, "js");
                assert_eq!(body.trim_end(), "console.log(1)");
            }
            other => panic!("expected code block, got {:?}", other),
        }
    }

    #[test]
    fn test_code_fence_without_language_defaults() {
        let formatted = format_response("before\n```\nlet x = 1;\n```\nafter");
        let blocks = tagged(&formatted);
        assert_eq!(
            blocks,
            vec![Block::Code {
                lang: "text".to_string(),
                body: "let x = 1;\n".to_string()
            }]
        );
        assert!(formatted.starts_with("before\n"));
        assert!(formatted.ends_with("\nafter"));
    }

    #[test]
    fn test_role_blocks_in_order() {
        let formatted = format_response("User: hi\nAssistant: hello");
        assert_eq!(
            tagged(&formatted),
            vec![
                Block::Turn {
                    role: Role::User,
                    content: vec![text("hi")]
                },
                Block::Turn {
                    role: Role::Assistant,
                    content: vec![text("hello")]
                },
            ]
        );
    }

    #[test]
    fn test_role_content_spans_lines_until_next_label() {
        let formatted = format_response("Intro\nUser: line one\nline two\nAssistant: ok");
        assert!(formatted.starts_with("Intro\n"));
        let blocks = tagged(&formatted);
        assert_eq!(
            blocks[0],
            Block::Turn {
                role: Role::User,
                content: vec![text("line one\nline two")]
            }
        );
    }

    #[test]
    fn test_role_label_matches_inside_words() {
        // The label is matched as a substring, like the pattern it mirrors
        let formatted = format_response("SuperUser: root");
        assert!(formatted.starts_with("Super<role name=\"User\">root</role>"));
    }

    #[test]
    fn test_turn_runs_across_code_until_next_label() {
        let raw = "User: fix this\n```rust\nfn main() {}\n```\nAssistant: done";
        let blocks = tagged(&format_response(raw));
        assert_eq!(
            blocks,
            vec![
                Block::Turn {
                    role: Role::User,
                    content: vec![
                        text("fix this\n"),
                        Block::Code {
                            lang: "rust".to_string(),
                            body: "fn main() {}\n".to_string()
                        },
                    ]
                },
                Block::Turn {
                    role: Role::Assistant,
                    content: vec![text("done")]
                },
            ]
        );
    }

    #[test]
    fn test_label_inside_fence_is_rewritten() {
        let formatted = format_response("```\nUser: x\n```");
        assert!(formatted.contains("<role name=\"User\">"));
        assert_eq!(
            parse_blocks(&formatted),
            vec![Block::Turn {
                role: Role::User,
                content: vec![Block::Code {
                    lang: "text".to_string(),
                    body: "x\n".to_string()
                }]
            }]
        );
    }

    #[test]
    fn test_plain_text_is_untouched() {
        let raw = "# Title\n\nJust some **markdown**.";
        assert_eq!(format_response(raw), raw);
        assert_eq!(parse_blocks(raw), vec![Block::Text(raw.to_string())]);
    }

    #[test]
    fn test_unterminated_fence_is_left_alone() {
        let raw = "```js\nconsole.log(1)";
        assert_eq!(format_response(raw), raw);
    }
}
