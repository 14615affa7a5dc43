//! Prompt template catalog and canned chat prompts

/// A titled block of instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub title: &'static str,
    pub body: &'static str,
}

/// A titled canned chat prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatExample {
    pub title: &'static str,
    pub content: &'static str,
}

/// The template a session starts with
pub const PROMPT_GUIDE: Template = Template {
    title: "Prompt Guide",
    body: "# Prompt Guide

## System Message
Define the AI's role and behavior.

## User Message
Clearly state your request or question.

## Examples
- \"Analyze this code for potential improvements\"
- \"Explain the purpose of this function\"
- \"Suggest a better implementation for...\"

## Best Practices
1. Be specific and clear
2. Provide context
3. Use examples when helpful
4. Break complex requests into steps",
};

pub const PROMPT_EXAMPLES: &[Template] = &[
    Template {
        title: "Code Review",
        body: "# Code Review Assistant

## Role
Act as a senior software engineer conducting a thorough code review.

## Focus Areas
1. Code quality and best practices
2. Performance optimization
3. Security considerations
4. Testing coverage
5. Documentation quality
6. Error handling
7. Edge cases consideration",
    },
    Template {
        title: "API Design",
        body: "# API Design Guide

## Objectives
- RESTful principles
- Clear endpoint naming
- Proper status codes
- Authentication/Authorization
- Rate limiting considerations
- API versioning strategy
- Error handling standards
- Documentation requirements",
    },
    Template {
        title: "Documentation",
        body: "# Technical Documentation

## Structure
1. Overview
2. Getting Started
3. API Reference
4. Examples
5. Troubleshooting
6. Best Practices
7. Security Considerations
8. Performance Guidelines",
    },
    Template {
        title: "Architecture Review",
        body: "# Architecture Review Guide

## Focus Areas
1. System Design
2. Scalability
3. Performance
4. Security
5. Maintainability
6. Cost Optimization
7. Technology Stack
8. Integration Points",
    },
    Template {
        title: "Security Audit",
        body: "# Security Audit Template

## Checklist
1. Authentication
2. Authorization
3. Data Encryption
4. Input Validation
5. Error Handling
6. Logging
7. Dependencies
8. API Security",
    },
];

pub const CHAT_EXAMPLES: &[ChatExample] = &[
    ChatExample {
        title: "Code Analysis",
        content: "Analyze this code for potential performance improvements and security vulnerabilities.",
    },
    ChatExample {
        title: "Feature Planning",
        content: "Help me plan the implementation of a new authentication system using JWT.",
    },
    ChatExample {
        title: "Bug Investigation",
        content: "Review this error log and help identify the root cause of the issue.",
    },
];

/// Everything the template picker lists: the guide first, then the examples
pub fn catalog() -> Vec<Template> {
    std::iter::once(PROMPT_GUIDE)
        .chain(PROMPT_EXAMPLES.iter().copied())
        .collect()
}
