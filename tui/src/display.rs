//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are folded from [`CoordinatorMessage`]s and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client": it renders what the coordinator tells it to.
//! Display state is the bridge between coordinator messages and rendering.
//!
//! - [`DisplayMessage`]: a chat message in the conversation pane
//! - [`DisplayTurn`]: a turn block in the thinking panel
//! - [`DisplayEntry`]: one line of a turn's thinking trace

use std::time::Duration;

use thinkchat_core::{
    CoordinatorMessage, EntryId, EntryVariant, MessageId, MessageRole, TurnNumber, TurnState,
};

/// How often the typing dots advance
const TYPING_FRAME: Duration = Duration::from_millis(350);

/// A rendered conversation message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Who sent this message
    pub role: MessageRole,
    /// The message content, verbatim
    pub content: String,
}

/// One line of a turn's thinking trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    /// Entry identifier
    pub id: EntryId,
    /// Accumulated text
    pub text: String,
    /// Visual variant
    pub variant: EntryVariant,
}

/// A turn block in the thinking panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayTurn {
    /// Turn ordinal
    pub turn: TurnNumber,
    /// Entries in arrival order
    pub entries: Vec<DisplayEntry>,
}

/// Complete display state
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// Conversation messages
    pub messages: Vec<DisplayMessage>,
    /// Whether the typing placeholder is shown
    pub typing: bool,
    /// Thinking panel blocks, oldest first
    pub turns: Vec<DisplayTurn>,
    /// Whether submitting is allowed
    pub input_enabled: bool,
    /// Coordinator turn state
    pub turn_state: TurnState,
    /// Set when the coordinator asked to clear the input box
    input_clear_requested: bool,
    /// Typing animation clock
    typing_elapsed: Duration,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            typing: false,
            turns: Vec::new(),
            input_enabled: true,
            turn_state: TurnState::Idle,
            input_clear_requested: false,
            typing_elapsed: Duration::ZERO,
        }
    }
}

impl DisplayState {
    /// Create an empty display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a coordinator message
    pub fn apply_message(&mut self, msg: CoordinatorMessage) {
        match msg {
            // Conversation
            CoordinatorMessage::Message { id, role, content } => {
                self.messages.push(DisplayMessage { id, role, content });
            }
            CoordinatorMessage::TypingShown => {
                self.typing = true;
                self.typing_elapsed = Duration::ZERO;
            }
            CoordinatorMessage::TypingRemoved => {
                self.typing = false;
            }

            // Thinking panel
            CoordinatorMessage::TurnOpened { turn } => {
                self.turns.push(DisplayTurn {
                    turn,
                    entries: Vec::new(),
                });
            }
            CoordinatorMessage::EntryAdded {
                id,
                turn,
                text,
                variant,
            } => {
                match self.turns.iter_mut().rev().find(|t| t.turn == turn) {
                    Some(block) => block.entries.push(DisplayEntry { id, text, variant }),
                    None => tracing::warn!(turn = turn.0, "Entry for unknown turn block"),
                }
            }
            CoordinatorMessage::EntryUpdated { id, text } => {
                if let Some(entry) = self.entry_mut(id) {
                    if entry.variant.is_live() {
                        entry.text = text;
                        entry.variant = EntryVariant::Active;
                    }
                }
            }
            CoordinatorMessage::EntryFinished { id } => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.variant = EntryVariant::Done;
                }
            }

            // Input
            CoordinatorMessage::InputCleared => {
                self.input_clear_requested = true;
            }
            CoordinatorMessage::InputEnabled { enabled } => {
                self.input_enabled = enabled;
            }
            CoordinatorMessage::InputFocused => {}

            // System
            CoordinatorMessage::State { state } => {
                self.turn_state = state;
            }
        }
    }

    /// Advance animation clocks
    pub fn update(&mut self, delta: Duration) {
        if self.typing {
            self.typing_elapsed += delta;
        }
    }

    /// Dots for the typing placeholder, cycling `.` `..` `...`
    #[must_use]
    pub fn typing_dots(&self) -> &'static str {
        let frame = self.typing_elapsed.as_millis() / TYPING_FRAME.as_millis();
        match frame % 3 {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }

    /// Consume a pending input-clear request
    pub fn take_input_clear(&mut self) -> bool {
        std::mem::take(&mut self.input_clear_requested)
    }

    /// Whether any entry still shows a streaming cursor
    #[must_use]
    pub fn has_live_entries(&self) -> bool {
        self.turns
            .iter()
            .flat_map(|t| &t.entries)
            .any(|e| e.variant.is_live())
    }

    /// Whether nothing has been said yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && !self.typing
    }

    fn entry_mut(&mut self, id: EntryId) -> Option<&mut DisplayEntry> {
        // Live entries are almost always in the newest block
        self.turns
            .iter_mut()
            .rev()
            .flat_map(|t| t.entries.iter_mut())
            .find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry_added(id: u64, turn: u64, text: &str, variant: EntryVariant) -> CoordinatorMessage {
        CoordinatorMessage::EntryAdded {
            id: EntryId(id),
            turn: TurnNumber(turn),
            text: text.to_string(),
            variant,
        }
    }

    #[test]
    fn test_default_display_state() {
        let state = DisplayState::new();
        assert!(state.is_empty());
        assert!(state.input_enabled);
        assert_eq!(state.turn_state, TurnState::Idle);
        assert!(!state.has_live_entries());
    }

    #[test]
    fn test_messages_append_in_order() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::Message {
            id: MessageId("m1".into()),
            role: MessageRole::User,
            content: "hello".into(),
        });
        state.apply_message(CoordinatorMessage::Message {
            id: MessageId("m2".into()),
            role: MessageRole::Assistant,
            content: "hi there".into(),
        });

        let contents: Vec<_> = state.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hello", "hi there"]);
        assert!(!state.is_empty());
    }

    #[test]
    fn test_typing_placeholder_toggles() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::TypingShown);
        assert!(state.typing);
        assert!(!state.is_empty());
        state.apply_message(CoordinatorMessage::TypingRemoved);
        assert!(!state.typing);
    }

    #[test]
    fn test_typing_dots_cycle() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::TypingShown);
        assert_eq!(state.typing_dots(), ".");
        state.update(TYPING_FRAME);
        assert_eq!(state.typing_dots(), "..");
        state.update(TYPING_FRAME);
        assert_eq!(state.typing_dots(), "...");
        state.update(TYPING_FRAME);
        assert_eq!(state.typing_dots(), ".");
    }

    #[test]
    fn test_entry_lifecycle() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::TurnOpened {
            turn: TurnNumber(1),
        });
        state.apply_message(entry_added(7, 1, "", EntryVariant::Pending));
        assert!(state.has_live_entries());

        state.apply_message(CoordinatorMessage::EntryUpdated {
            id: EntryId(7),
            text: "考え".into(),
        });
        assert_eq!(
            state.turns[0].entries[0],
            DisplayEntry {
                id: EntryId(7),
                text: "考え".into(),
                variant: EntryVariant::Active
            }
        );

        state.apply_message(CoordinatorMessage::EntryFinished { id: EntryId(7) });
        assert_eq!(state.turns[0].entries[0].variant, EntryVariant::Done);
        assert!(!state.has_live_entries());

        // Late updates do not reopen a finished entry
        state.apply_message(CoordinatorMessage::EntryUpdated {
            id: EntryId(7),
            text: "late".into(),
        });
        assert_eq!(state.turns[0].entries[0].text, "考え");
    }

    #[test]
    fn test_entries_land_in_their_turn() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::TurnOpened {
            turn: TurnNumber(1),
        });
        state.apply_message(entry_added(1, 1, "first", EntryVariant::Info));
        state.apply_message(CoordinatorMessage::TurnOpened {
            turn: TurnNumber(2),
        });
        state.apply_message(entry_added(2, 2, "second", EntryVariant::Done));
        state.apply_message(entry_added(3, 9, "orphan", EntryVariant::Info));

        assert_eq!(state.turns.len(), 2);
        assert_eq!(state.turns[0].entries.len(), 1);
        assert_eq!(state.turns[1].entries[0].text, "second");
    }

    #[test]
    fn test_input_directives() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::InputEnabled { enabled: false });
        state.apply_message(CoordinatorMessage::InputCleared);
        assert!(!state.input_enabled);
        assert!(state.take_input_clear());
        assert!(!state.take_input_clear());

        state.apply_message(CoordinatorMessage::InputEnabled { enabled: true });
        state.apply_message(CoordinatorMessage::InputFocused);
        assert!(state.input_enabled);
    }

    #[test]
    fn test_turn_state_tracked() {
        let mut state = DisplayState::new();
        state.apply_message(CoordinatorMessage::State {
            state: TurnState::AwaitingReply,
        });
        assert_eq!(state.turn_state, TurnState::AwaitingReply);
    }
}
