use serde::{Deserialize, Serialize};

/// AI personality profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Personality {
    #[default]
    CodeReviewer,
    Architect,
    Debugger,
    DocumentationWriter,
}

impl Personality {
    pub fn all() -> &'static [Personality] {
        &[
            Personality::CodeReviewer,
            Personality::Architect,
            Personality::Debugger,
            Personality::DocumentationWriter,
        ]
    }

    /// Stable key used in config and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Personality::CodeReviewer => "codeReviewer",
            Personality::Architect => "architect",
            Personality::Debugger => "debugger",
            Personality::DocumentationWriter => "documentationWriter",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Personality::CodeReviewer => "Code Reviewer",
            Personality::Architect => "System Architect",
            Personality::Debugger => "Debugger",
            Personality::DocumentationWriter => "Documentation Writer",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Personality::CodeReviewer => {
                "You are an expert code reviewer focusing on best practices, security, and performance."
            }
            Personality::Architect => {
                "You are a senior system architect specializing in scalable system design and architecture patterns."
            }
            Personality::Debugger => {
                "You are an expert debugger focusing on identifying and fixing complex software issues."
            }
            Personality::DocumentationWriter => {
                "You are a technical writer specializing in clear, comprehensive documentation."
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|p| p == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|p| p == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_code_reviewer() {
        assert_eq!(Personality::default(), Personality::CodeReviewer);
    }

    #[test]
    fn test_key_round_trip() {
        for p in Personality::all() {
            assert_eq!(Personality::from_key(p.key()), Some(*p));
        }
        assert_eq!(Personality::from_key("poet"), None);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(
            Personality::DocumentationWriter.next(),
            Personality::CodeReviewer
        );
        assert_eq!(
            Personality::CodeReviewer.prev(),
            Personality::DocumentationWriter
        );
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let json = serde_json::to_string(&Personality::DocumentationWriter).unwrap();
        assert_eq!(json, "\"documentationWriter\"");
    }
}
