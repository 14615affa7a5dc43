//! Prompt pipeline
//!
//! `Idle -> Submitting -> (success | failure) -> Idle`. Submitting hands out
//! one [`CompletionRequest`]; the caller runs it and reports back through
//! [`Pipeline::complete`]. Nothing here touches the network.

pub mod format;
pub mod personality;
pub mod templates;

pub use format::{format_response, parse_blocks, Block, Role};
pub use personality::Personality;

use chrono::{DateTime, Local};

/// Shown in the output pane when a request fails
pub const FAILURE_MESSAGE: &str =
    "Error generating response. Please check your API key and try again.";

/// Where an applied template lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateTarget {
    #[default]
    Instructions,
    Analysis,
}

impl TemplateTarget {
    pub fn toggle(&self) -> Self {
        match self {
            TemplateTarget::Instructions => TemplateTarget::Analysis,
            TemplateTarget::Analysis => TemplateTarget::Instructions,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateTarget::Instructions => "instructions",
            TemplateTarget::Analysis => "analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Holds the prompt text that was sent
    Submitting { prompt: String },
}

/// One answered prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHistoryEntry {
    pub prompt: String,
    /// Formatted response
    pub response: String,
    pub answered_at: DateTime<Local>,
}

/// Everything needed for one outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub personality: Personality,
    pub system_prompt: String,
    pub instructions: String,
    pub prompt: String,
}

impl CompletionRequest {
    /// The user message sent alongside the personality's system prompt
    pub fn user_message(&self) -> String {
        format!(
            "Instructions: {}\n\nPrompt: {}",
            self.instructions, self.prompt
        )
    }
}

/// Result of finishing a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Answered,
    Failed,
    /// A completion arrived while idle and was dropped
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub custom_instructions: String,
    pub chat_prompt: String,
    /// Latest output, already formatted
    pub ai_response: String,
    pub personality: Personality,
    /// Template applied by [`Pipeline::apply_template`]
    pub prompt_template: String,
    pub template_target: TemplateTarget,
    pub history: Vec<ChatHistoryEntry>,
    pub phase: Phase,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Personality::default())
    }
}

impl Pipeline {
    pub fn new(personality: Personality) -> Self {
        Self {
            custom_instructions: String::new(),
            chat_prompt: String::new(),
            ai_response: String::new(),
            personality,
            prompt_template: templates::PROMPT_GUIDE.body.to_string(),
            template_target: TemplateTarget::default(),
            history: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching any state when the prompt is blank or
    /// a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<CompletionRequest> {
        if self.is_submitting() || self.chat_prompt.trim().is_empty() {
            return None;
        }

        let prompt = self.chat_prompt.clone();
        self.phase = Phase::Submitting {
            prompt: prompt.clone(),
        };
        Some(CompletionRequest {
            personality: self.personality,
            system_prompt: self.personality.system_prompt().to_string(),
            instructions: self.custom_instructions.clone(),
            prompt,
        })
    }

    /// Finish the in-flight submission with the raw completion or an error
    pub fn complete<E>(&mut self, result: Result<String, E>) -> Outcome {
        let Phase::Submitting { prompt } = std::mem::take(&mut self.phase) else {
            return Outcome::Ignored;
        };

        match result {
            Ok(raw) => {
                let formatted = format_response(&raw);
                self.ai_response = formatted.clone();
                self.history.push(ChatHistoryEntry {
                    prompt,
                    response: formatted,
                    answered_at: Local::now(),
                });
                self.chat_prompt.clear();
                Outcome::Answered
            }
            Err(_) => {
                self.ai_response = FAILURE_MESSAGE.to_string();
                Outcome::Failed
            }
        }
    }

    /// Overwrite the current target with the current template
    pub fn apply_template(&mut self) {
        match self.template_target {
            TemplateTarget::Instructions => {
                self.custom_instructions = self.prompt_template.clone();
            }
            TemplateTarget::Analysis => {
                self.ai_response = self.prompt_template.clone();
            }
        }
    }

    /// Make `body` the current template and apply it
    pub fn choose_template(&mut self, body: &str) {
        self.prompt_template = body.to_string();
        self.apply_template();
    }

    /// Write a template straight into the instructions, ignoring the target
    pub fn use_template(&mut self, body: &str) {
        self.custom_instructions = body.to_string();
    }
}
