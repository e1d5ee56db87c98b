//! Coordinator Messages
//!
//! Messages sent from the turn coordinator to UI surfaces. A surface is a pure
//! renderer: it folds these messages into whatever it displays and holds no
//! conversation logic of its own.
//!
//! # Design Philosophy
//!
//! The coordinator decides *what* appears (a user message, a thinking entry,
//! a finished trace line) and in which order. Surfaces decide *how* it looks.
//! This keeps the animation/network race testable without a terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Messages from the coordinator to a UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorMessage {
    // ============================================
    // Conversation Messages
    // ============================================
    /// A complete chat message to append to the message list
    Message {
        /// Unique message ID
        id: MessageId,
        /// Who sent this message
        role: MessageRole,
        /// The message text (untrusted, render verbatim or escaped)
        content: String,
    },

    /// Show the transient "typing" placeholder bubble
    TypingShown,

    /// Remove the "typing" placeholder bubble
    TypingRemoved,

    // ============================================
    // Thinking Panel
    // ============================================
    /// A new turn block was opened in the thinking panel
    TurnOpened {
        /// Turn ordinal (1-based)
        turn: TurnNumber,
    },

    /// A thinking entry was appended to a turn block
    EntryAdded {
        /// Entry identifier
        id: EntryId,
        /// Turn block the entry belongs to
        turn: TurnNumber,
        /// Initial text
        text: String,
        /// Initial variant
        variant: EntryVariant,
    },

    /// A live entry's accumulated text changed (full buffer, not a delta)
    EntryUpdated {
        /// Entry identifier
        id: EntryId,
        /// Full accumulated text
        text: String,
    },

    /// A live entry finished streaming
    EntryFinished {
        /// Entry identifier
        id: EntryId,
    },

    // ============================================
    // Input Directives
    // ============================================
    /// Clear the input box
    InputCleared,

    /// Enable or disable the submit affordance
    InputEnabled {
        /// Whether input is accepted
        enabled: bool,
    },

    /// Return keyboard focus to the input box
    InputFocused,

    // ============================================
    // System Messages
    // ============================================
    /// Turn state change
    State {
        /// The new state
        state: TurnState,
    },
}

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// Thinking entry identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl EntryId {
    /// Generate a new unique entry ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn ordinal, starting at 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnNumber(pub u64);

impl fmt::Display for TurnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to a turn's block in the thinking panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnBlock {
    /// The turn this block displays
    pub turn: TurnNumber,
}

/// Who sent a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// User input
    User,
    /// The assistant
    Assistant,
}

impl MessageRole {
    /// CSS class used by markup surfaces
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "ai",
        }
    }
}

/// Visual variant of a thinking entry
///
/// Live entries go `Pending -> Active -> Done`. `Info` and one-shot `Done`
/// entries are terminal from the moment they are added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryVariant {
    /// Opened, nothing streamed yet
    Pending,
    /// Streaming
    Active,
    /// Finished
    Done,
    /// One-shot notice
    Info,
}

impl EntryVariant {
    /// Icon shown in front of the entry text
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pending | Self::Active => "▸",
            Self::Done => "✓",
            Self::Info => "·",
        }
    }

    /// Whether the entry still shows a streaming cursor
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }

    /// CSS class used by markup surfaces
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Done => "done",
            Self::Info => "info",
        }
    }
}

/// Turn coordinator states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TurnState {
    /// Ready for input
    #[default]
    Idle,
    /// Input accepted, turn being set up
    Submitted,
    /// Waiting on the transport
    AwaitingReply,
    /// Transport returned a reply
    RepliedOk,
    /// Transport returned an application error
    RepliedError,
    /// Transport faulted
    RepliedNetworkFail,
}

impl TurnState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Submitted => "Sending...",
            Self::AwaitingReply => "Thinking...",
            Self::RepliedOk => "Replied",
            Self::RepliedError => "Error from API",
            Self::RepliedNetworkFail => "Network error",
        }
    }

    /// Whether a turn is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
