//! Theme and Colors
//!
//! A small, fixed palette. The conversation pane echoes the chat bubbles of a
//! web client (green user, violet assistant); the thinking panel uses cool
//! blues while streaming and settles to green or gray.

use ratatui::style::{Color, Modifier, Style};

use thinkchat_core::{EntryVariant, MessageRole};

// ============================================================================
// Conversation
// ============================================================================

/// User message text
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Assistant message text
pub const ASSISTANT_VIOLET: Color = Color::Rgb(190, 160, 255);

/// Error-marked assistant text (`! ...`)
pub const ERROR_RED: Color = Color::Rgb(255, 100, 100);

/// Typing placeholder dots
pub const TYPING_GRAY: Color = Color::Rgb(150, 150, 150);

// ============================================================================
// Thinking Panel
// ============================================================================

/// Entry still streaming
pub const THINK_ACTIVE: Color = Color::Rgb(150, 180, 255);

/// Finished entry
pub const THINK_DONE: Color = Color::Rgb(120, 200, 140);

/// One-shot notice
pub const THINK_INFO: Color = Color::Rgb(170, 170, 170);

/// Turn label above each block
pub const TURN_LABEL: Color = Color::Rgb(110, 110, 140);

// ============================================================================
// Chrome
// ============================================================================

/// Separators, hints, placeholders
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Scroll indicator
pub const SCROLL_YELLOW: Color = Color::Yellow;

/// Style for a chat message body
#[must_use]
pub fn message_style(role: MessageRole, text: &str, error_marker: &str) -> Style {
    match role {
        MessageRole::User => Style::default().fg(USER_GREEN),
        MessageRole::Assistant if text.starts_with(error_marker) => {
            Style::default().fg(ERROR_RED)
        }
        MessageRole::Assistant => Style::default().fg(ASSISTANT_VIOLET),
    }
}

/// Style for a thinking entry
#[must_use]
pub fn entry_style(variant: EntryVariant) -> Style {
    match variant {
        EntryVariant::Pending | EntryVariant::Active => Style::default().fg(THINK_ACTIVE),
        EntryVariant::Done => Style::default().fg(THINK_DONE),
        EntryVariant::Info => Style::default()
            .fg(THINK_INFO)
            .add_modifier(Modifier::ITALIC),
    }
}
