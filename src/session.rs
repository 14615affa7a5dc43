//! Session state container
//!
//! Every state cell of the explorer lives in [`Session`]. Input handlers
//! translate keys into [`Action`]s and the runtime carries out the
//! [`Effect`]s that [`Session::update`] hands back.

use crate::files::{self, FileNode};
use crate::pipeline::{CompletionRequest, Outcome, Personality, Pipeline};
use crate::surface::{ActiveTab, TabSurface};
use crate::tree::{self, Address, TreeRow, TreeState};
use tracing::{debug, info};

/// Message shown when the settings form is saved empty
pub const API_KEY_REQUIRED: &str = "API Key is required";

/// A single edit to a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Replace(String),
}

impl TextEdit {
    fn apply(self, text: &mut String) {
        match self {
            TextEdit::Insert(c) => text.push(c),
            TextEdit::Backspace => {
                text.pop();
            }
            TextEdit::Replace(s) => *text = s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Click on the tree node at this address
    Activate(Address),
    AddFiles(Vec<FileNode>),
    EditInstructions(TextEdit),
    EditChatPrompt(TextEdit),
    SelectPersonality(Personality),
    Submit,
    /// Raw completion text or the error description
    Completed(Result<String, String>),
    ChooseTemplate(String),
    UseTemplate(String),
    ToggleTemplateTarget,
    SwitchTab(ActiveTab),
    Bookmark(usize),
    SaveApiKey(String),
}

/// Work the caller must carry out after an update
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(CompletionRequest),
    Notify(String),
}

pub struct Session {
    pub files: Vec<FileNode>,
    pub tree: TreeState,
    pub selected_path: Vec<String>,
    pub selected_node: Option<FileNode>,
    pub pipeline: Pipeline,
    pub surface: TabSurface,
    /// Held in memory only
    pub api_key: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(files::demo_tree(), Personality::default())
    }
}

impl Session {
    pub fn new(files: Vec<FileNode>, personality: Personality) -> Self {
        Self {
            files,
            tree: TreeState::new(),
            selected_path: Vec::new(),
            selected_node: None,
            pipeline: Pipeline::new(personality),
            surface: TabSurface::default(),
            api_key: None,
        }
    }

    /// Visible tree rows
    pub fn rows(&self) -> Vec<TreeRow> {
        tree::walk(&self.files, &self.tree, &self.selected_path)
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Activate(address) => {
                let activation = self.tree.activate(&self.files, &address)?;
                debug!(path = %activation.path.join("/"), "node activated");
                self.selected_path = activation.path;
                self.selected_node = Some(activation.node);
                let row_count = self.rows().len();
                self.tree.clamp_cursor(row_count);
                None
            }
            Action::AddFiles(nodes) => {
                if nodes.is_empty() {
                    return None;
                }
                let count = nodes.len();
                info!(count, "files added to tree root");
                self.files.extend(nodes);
                Some(Effect::Notify(format!(
                    "+ Added {} file{}",
                    count,
                    if count == 1 { "" } else { "s" }
                )))
            }
            Action::EditInstructions(edit) => {
                edit.apply(&mut self.pipeline.custom_instructions);
                None
            }
            Action::EditChatPrompt(edit) => {
                edit.apply(&mut self.pipeline.chat_prompt);
                None
            }
            Action::SelectPersonality(personality) => {
                self.pipeline.personality = personality;
                None
            }
            Action::Submit => {
                let request = self.pipeline.begin_submit()?;
                info!(
                    personality = request.personality.key(),
                    prompt_chars = request.prompt.chars().count(),
                    "submitting prompt"
                );
                Some(Effect::Request(request))
            }
            Action::Completed(result) => {
                let error = result.as_ref().err().cloned();
                match self.pipeline.complete(result) {
                    Outcome::Answered => {
                        let len = self.pipeline.history.len();
                        self.surface.history_cursor = len.saturating_sub(1);
                        info!(history_len = len, "response recorded");
                        None
                    }
                    Outcome::Failed => {
                        let detail = error.unwrap_or_default();
                        info!(error = %detail, "request failed");
                        Some(Effect::Notify(format!("Request error: {}", detail)))
                    }
                    Outcome::Ignored => None,
                }
            }
            Action::ChooseTemplate(body) => {
                self.pipeline.choose_template(&body);
                None
            }
            Action::UseTemplate(body) => {
                self.pipeline.use_template(&body);
                None
            }
            Action::ToggleTemplateTarget => {
                self.pipeline.template_target = self.pipeline.template_target.toggle();
                None
            }
            Action::SwitchTab(tab) => {
                self.surface.switch(tab);
                None
            }
            Action::Bookmark(index) => {
                let bookmark = self.surface.bookmark(&self.pipeline.history, index)?;
                debug!(id = %bookmark.id, "bookmarked history entry");
                Some(Effect::Notify(format!("+ Bookmarked prompt {}", index + 1)))
            }
            Action::SaveApiKey(key) => {
                if key.is_empty() {
                    return Some(Effect::Notify(API_KEY_REQUIRED.to_string()));
                }
                self.api_key = Some(key);
                Some(Effect::Notify("+ API key saved for this session".to_string()))
            }
        }
    }

    /// Selection rendered for the status line
    pub fn selection_label(&self) -> Option<String> {
        if self.selected_path.is_empty() {
            None
        } else {
            Some(self.selected_path.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FAILURE_MESSAGE;

    fn submit(session: &mut Session, prompt: &str) -> Option<Effect> {
        session.update(Action::EditChatPrompt(TextEdit::Replace(prompt.to_string())));
        session.update(Action::Submit)
    }

    #[test]
    fn test_activation_updates_selection() {
        let mut session = Session::default();
        session.update(Action::Activate(vec![0]));
        assert_eq!(session.selected_path, vec!["Documents"]);
        assert_eq!(session.selected_node.as_ref().map(|n| n.name()), Some("Documents"));
        assert!(session.tree.is_open(&[0]));

        session.update(Action::Activate(vec![0, 1]));
        assert_eq!(session.selected_path, vec!["Documents", "data.json"]);
        // Nested selection does not highlight anything
        assert!(session.rows().iter().all(|r| !r.selected));
    }

    #[test]
    fn test_top_level_selection_highlights_row() {
        let mut session = Session::default();
        session.update(Action::Activate(vec![1]));
        let rows = session.rows();
        let selected: Vec<_> = rows.iter().filter(|r| r.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "README.md");
    }

    #[test]
    fn test_collapse_clamps_cursor() {
        let mut session = Session::default();
        session.update(Action::Activate(vec![0]));
        session.tree.cursor_end(session.rows().len());
        assert_eq!(session.tree.cursor, 4);
        session.update(Action::Activate(vec![0]));
        assert_eq!(session.tree.cursor, 1);
    }

    #[test]
    fn test_added_files_append_to_root() {
        let mut session = Session::default();
        let effect = session.update(Action::AddFiles(files::nodes_from_input("plan.md,deploy.yaml")));
        assert!(matches!(effect, Some(Effect::Notify(_))));
        let names: Vec<_> = session.files.iter().map(|n| n.name().to_string()).collect();
        assert_eq!(names, vec!["Documents", "README.md", "plan.md", "deploy.yaml"]);
        assert_eq!(session.update(Action::AddFiles(Vec::new())), None);
    }

    #[test]
    fn test_blank_submit_changes_nothing() {
        let mut session = Session::default();
        session.pipeline.ai_response = "kept".to_string();
        assert_eq!(submit(&mut session, "  \n "), None);
        assert_eq!(session.pipeline.chat_prompt, "  \n ");
        assert_eq!(session.pipeline.ai_response, "kept");
        assert!(session.pipeline.history.is_empty());
    }

    #[test]
    fn test_submit_then_success() {
        let mut session = Session::default();
        session.update(Action::SelectPersonality(Personality::Architect));
        session.update(Action::SwitchTab(ActiveTab::Bookmarks));
        let Some(Effect::Request(request)) = submit(&mut session, "Design a cache") else {
            panic!("expected a request");
        };
        assert_eq!(request.personality, Personality::Architect);
        assert_eq!(session.surface.active, ActiveTab::Bookmarks);

        session.update(Action::Completed(Ok("```rust\nstruct Cache;\n```".to_string())));
        assert_eq!(session.pipeline.history.len(), 1);
        assert_eq!(session.pipeline.history[0].prompt, "Design a cache");
        assert!(session.pipeline.chat_prompt.is_empty());
        assert!(session.pipeline.ai_response.contains("<pre lang=\"rust\">"));
    }

    #[test]
    fn test_submit_then_failure() {
        let mut session = Session::default();
        submit(&mut session, "Design a cache");
        let effect = session.update(Action::Completed(Err("Invalid API key".to_string())));
        assert!(matches!(effect, Some(Effect::Notify(msg)) if msg.contains("Invalid API key")));
        assert!(session.pipeline.history.is_empty());
        assert_eq!(session.pipeline.chat_prompt, "Design a cache");
        assert_eq!(session.pipeline.ai_response, FAILURE_MESSAGE);
        assert!(!session.pipeline.is_submitting());
    }

    #[test]
    fn test_failure_leaves_bookmarks_alone() {
        let mut session = Session::default();
        submit(&mut session, "one");
        session.update(Action::Completed(Ok("answer".to_string())));
        session.update(Action::Bookmark(0));
        submit(&mut session, "two");
        session.update(Action::Completed(Err("boom".to_string())));
        assert_eq!(session.surface.bookmarks.len(), 1);
        assert_eq!(session.pipeline.history.len(), 1);
    }

    #[test]
    fn test_bookmark_history_entry() {
        let mut session = Session::default();
        submit(&mut session, "q");
        session.update(Action::Completed(Ok("a".to_string())));
        let history_before = session.pipeline.history.clone();

        session.update(Action::Bookmark(0));
        assert_eq!(session.surface.bookmarks.len(), 1);
        assert_eq!(session.surface.bookmarks[0].content, history_before[0].response);
        assert_eq!(session.pipeline.history, history_before);
        assert_eq!(session.update(Action::Bookmark(5)), None);
    }

    #[test]
    fn test_template_actions() {
        let mut session = Session::default();
        session.update(Action::ChooseTemplate("# T".to_string()));
        assert_eq!(session.pipeline.custom_instructions, "# T");

        session.update(Action::ToggleTemplateTarget);
        session.update(Action::ChooseTemplate("# U".to_string()));
        assert_eq!(session.pipeline.ai_response, "# U");
        assert_eq!(session.pipeline.custom_instructions, "# T");
    }

    #[test]
    fn test_instruction_edits() {
        let mut session = Session::default();
        for c in "ab".chars() {
            session.update(Action::EditInstructions(TextEdit::Insert(c)));
        }
        session.update(Action::EditInstructions(TextEdit::Insert('\n')));
        session.update(Action::EditInstructions(TextEdit::Backspace));
        session.update(Action::EditInstructions(TextEdit::Backspace));
        assert_eq!(session.pipeline.custom_instructions, "a");
    }

    #[test]
    fn test_api_key_must_be_non_empty() {
        let mut session = Session::default();
        let effect = session.update(Action::SaveApiKey(String::new()));
        assert_eq!(effect, Some(Effect::Notify(API_KEY_REQUIRED.to_string())));
        assert!(session.api_key.is_none());

        // Only emptiness is checked; the key is stored as typed
        session.update(Action::SaveApiKey(" sk-test ".to_string()));
        assert_eq!(session.api_key.as_deref(), Some(" sk-test "));
    }
}
