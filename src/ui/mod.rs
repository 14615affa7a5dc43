//! Scribe UI - a three-column explorer with an AI side panel
//!
//! Layout:
//! ╔══════════════════════════════════════════════════════════════════╗
//! ║  s c r i b e                                                     ║
//! ╠════════════════╦═══════════════════════╦═════════════════════════╣
//! ║  FILES         ║  INSTRUCTIONS         ║  Output History Bookm.  ║
//! ║  ▾ Documents   ║  Be concise.          ║                         ║
//! ║    ⚙ config    ║                       ║  ┌ rust                 ║
//! ║    { data.json ║  PERSONALITY          ║  │ fn main() {}         ║
//! ║  ▸ Notes       ║  ‹ Code Reviewer ›    ║  └                      ║
//! ║  ✎ README.md   ║  PROMPT               ║                         ║
//! ║                ║  Why is this slow?▏   ║                         ║
//! ╠════════════════╩═══════════════════════╩═════════════════════════╣
//! ║  Documents/data.json  ⠙ thinking   ↵ send  ? help  q quit        ║
//! ╚══════════════════════════════════════════════════════════════════╝

pub mod helpers;
pub mod markdown;
mod render;
pub mod theme;

pub use render::{render, tab_content};

use crate::config::Config;
use crate::pipeline::templates;
use crate::pipeline::CompletionRequest;
use crate::session::{Action, Effect, Session, TextEdit, API_KEY_REQUIRED};
use crate::surface::ActiveTab;
use ratatui::layout::Rect;
use std::time::Instant;

/// Panel that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Files,
    Instructions,
    Chat,
    Output,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Files, Focus::Instructions, Focus::Chat, Focus::Output];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Where typed characters go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditInstructions,
    EditChat,
}

/// Overlay state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    /// API key form
    Settings {
        input: String,
    },
    /// Prompt template catalog
    Templates {
        selected: usize,
    },
    /// Canned chat prompts
    ChatExamples {
        selected: usize,
    },
    /// Comma separated paths to add to the tree
    AddFiles {
        input: String,
    },
}

/// Type of toast notification - determines styling and behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 8,
        }
    }
}

/// Toast notification
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str) -> Self {
        // Success markers win over error keywords
        let kind = if message.starts_with('+') {
            ToastKind::Success
        } else if message.contains("error")
            || message.contains("Error")
            || message.contains("failed")
            || message == API_KEY_REQUIRED
        {
            ToastKind::Error
        } else {
            ToastKind::Info
        };

        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub config: Config,

    pub focus: Focus,
    pub input_mode: InputMode,
    pub overlay: Overlay,
    pub toast: Option<Toast>,
    pub should_quit: bool,

    /// Spinner frame while a request is in flight
    pub loading_frame: usize,
    /// Last known terminal area, used to size scrolling
    pub viewport: Rect,
}

impl App {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session,
            config,
            focus: Focus::default(),
            input_mode: InputMode::default(),
            overlay: Overlay::None,
            toast: None,
            should_quit: false,
            loading_frame: 0,
            viewport: Rect::new(0, 0, 120, 40),
        }
    }

    /// Run an action through the session.
    ///
    /// Notifications become toasts. A request is handed back for the caller
    /// to run in the background.
    pub fn dispatch(&mut self, action: Action) -> Option<CompletionRequest> {
        match self.session.update(action)? {
            Effect::Notify(message) => {
                self.show_toast(&message);
                None
            }
            Effect::Request(request) => {
                self.loading_frame = 0;
                Some(request)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.session.pipeline.is_submitting()
    }

    pub fn tick_loading(&mut self) {
        if self.is_loading() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
    }

    pub fn clear_expired_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message));
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  TREE
    // ═══════════════════════════════════════════════════════════════════════

    pub fn tree_down(&mut self) {
        let rows = self.session.rows().len();
        self.session.tree.cursor_down(rows);
    }

    pub fn tree_up(&mut self) {
        self.session.tree.cursor_up();
    }

    /// Activate the row under the cursor
    pub fn activate_cursor(&mut self) {
        let rows = self.session.rows();
        if let Some(row) = rows.get(self.session.tree.cursor) {
            self.dispatch(Action::Activate(row.address.clone()));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  EDITING
    // ═══════════════════════════════════════════════════════════════════════

    pub fn start_editing(&mut self, mode: InputMode) {
        self.focus = match mode {
            InputMode::EditInstructions => Focus::Instructions,
            InputMode::EditChat => Focus::Chat,
            InputMode::Normal => self.focus,
        };
        self.input_mode = mode;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Apply an edit to whichever field is being edited
    pub fn edit(&mut self, edit: TextEdit) {
        match self.input_mode {
            InputMode::EditInstructions => {
                self.dispatch(Action::EditInstructions(edit));
            }
            InputMode::EditChat => {
                self.dispatch(Action::EditChatPrompt(edit));
            }
            InputMode::Normal => {}
        }
    }

    /// Insert pasted text into the field being edited
    pub fn paste(&mut self, text: &str) {
        if self.input_mode == InputMode::Normal {
            return;
        }
        for c in text.chars().filter(|c| *c != '\r') {
            self.edit(TextEdit::Insert(c));
        }
    }

    pub fn cycle_personality(&mut self, forward: bool) {
        let current = self.session.pipeline.personality;
        let next = if forward { current.next() } else { current.prev() };
        self.dispatch(Action::SelectPersonality(next));
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  TABS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn switch_tab(&mut self, tab: ActiveTab) {
        self.dispatch(Action::SwitchTab(tab));
    }

    /// Width of the text inside the tab panel for the current viewport
    pub fn tab_width(&self) -> usize {
        render::columns(self.viewport)[2].width.saturating_sub(2) as usize
    }

    fn tab_height(&self) -> usize {
        render::columns(self.viewport)[2].height.saturating_sub(3) as usize
    }

    pub fn scroll_down(&mut self) {
        let active = self.session.surface.active;
        let (lines, _) = tab_content(&self.session, active, self.tab_width());
        let max = lines.len().saturating_sub(self.tab_height());
        self.session.surface.scroll_down();
        self.session.surface.clamp_scroll(active, max);
    }

    pub fn scroll_up(&mut self) {
        self.session.surface.scroll_up();
    }

    /// Move the history cursor and bring its entry into view
    pub fn move_history_cursor(&mut self, forward: bool) {
        let len = self.session.pipeline.history.len();
        if forward {
            self.session.surface.history_cursor_down(len);
        } else {
            self.session.surface.history_cursor_up();
        }

        let (_, starts) = tab_content(&self.session, ActiveTab::History, self.tab_width());
        if let Some(start) = starts.get(self.session.surface.history_cursor) {
            // Keep the spacer or separator above the entry in view
            self.session.surface.switch(ActiveTab::History);
            self.session.surface.scroll_home();
            for _ in 0..start.saturating_sub(1) {
                self.session.surface.scroll_down();
            }
        }
    }

    pub fn bookmark_cursor(&mut self) {
        let index = self.session.surface.history_cursor;
        self.dispatch(Action::Bookmark(index));
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  OVERLAYS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn open_settings(&mut self) {
        self.overlay = Overlay::Settings {
            input: self.session.api_key.clone().unwrap_or_default(),
        };
    }

    /// Save the settings form; the overlay stays open when rejected
    pub fn save_settings(&mut self) {
        let Overlay::Settings { input } = &self.overlay else {
            return;
        };
        let input = input.clone();
        self.dispatch(Action::SaveApiKey(input));
        if self.session.api_key.is_some()
            && self.toast.as_ref().map(|t| t.message.as_str()) != Some(API_KEY_REQUIRED)
        {
            self.close_overlay();
        }
    }

    /// Number of entries in the open list overlay
    pub fn overlay_len(&self) -> usize {
        match self.overlay {
            Overlay::Templates { .. } => templates::catalog().len(),
            Overlay::ChatExamples { .. } => templates::CHAT_EXAMPLES.len(),
            _ => 0,
        }
    }

    pub fn overlay_down(&mut self) {
        let len = self.overlay_len();
        match &mut self.overlay {
            Overlay::Help { scroll } => *scroll += 1,
            Overlay::Templates { selected } | Overlay::ChatExamples { selected } => {
                if *selected + 1 < len {
                    *selected += 1;
                }
            }
            _ => {}
        }
    }

    pub fn overlay_up(&mut self) {
        match &mut self.overlay {
            Overlay::Help { scroll } => *scroll = scroll.saturating_sub(1),
            Overlay::Templates { selected } | Overlay::ChatExamples { selected } => {
                *selected = selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Apply the highlighted template. `direct` skips the target and always
    /// writes the instructions.
    pub fn apply_selected_template(&mut self, direct: bool) {
        let Overlay::Templates { selected } = self.overlay else {
            return;
        };
        let Some(template) = templates::catalog().get(selected).copied() else {
            return;
        };
        let body = template.body.to_string();
        if direct {
            self.dispatch(Action::UseTemplate(body));
        } else {
            self.dispatch(Action::ChooseTemplate(body));
        }
        self.show_toast(&format!("+ Applied {}", template.title));
        self.close_overlay();
    }

    /// Put the highlighted example into the chat prompt
    pub fn use_selected_example(&mut self) {
        let Overlay::ChatExamples { selected } = self.overlay else {
            return;
        };
        let Some(example) = templates::CHAT_EXAMPLES.get(selected) else {
            return;
        };
        self.dispatch(Action::EditChatPrompt(TextEdit::Replace(
            example.content.to_string(),
        )));
        self.close_overlay();
        self.focus = Focus::Chat;
    }

    pub fn submit_add_files(&mut self) {
        let Overlay::AddFiles { input } = &self.overlay else {
            return;
        };
        let nodes = crate::files::nodes_from_input(input);
        self.close_overlay();
        if nodes.is_empty() {
            self.show_toast("No file names given");
            return;
        }
        self.dispatch(Action::AddFiles(nodes));
    }
}
