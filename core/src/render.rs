//! Text Rendering
//!
//! Message text and thinking entries come from the user and from a remote
//! model, so they are untrusted. Terminal surfaces print them verbatim;
//! anything emitting raw markup goes through [`escape_markup`] first.
//!
//! [`MarkupSurface`] is a [`Surface`] that keeps the whole chat in memory and
//! renders it as an HTML fragment on demand. It backs the headless
//! `--render-html` mode and is handy for eyeballing a turn in tests.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write as _;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::locale::Strings;
use crate::messages::{
    EntryId, EntryVariant, MessageId, MessageRole, TurnBlock, TurnNumber, TurnState,
};
use crate::surface::Surface;

/// Escape `&`, `<` and `>` for embedding in markup
///
/// `&` is replaced first so already-produced entities are not mangled.
/// Borrows the input when nothing needs escaping.
#[must_use]
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

struct MarkupMessage {
    role: MessageRole,
    text: String,
}

struct MarkupEntry {
    text: String,
    variant: EntryVariant,
}

#[derive(Default)]
struct MarkupState {
    messages: Vec<MarkupMessage>,
    typing: bool,
    blocks: Vec<(TurnNumber, Vec<EntryId>)>,
    entries: HashMap<EntryId, MarkupEntry>,
    input_enabled: bool,
    state: TurnState,
}

/// In-memory surface that renders the chat as an HTML fragment
pub struct MarkupSurface {
    strings: &'static Strings,
    state: Mutex<MarkupState>,
}

impl MarkupSurface {
    /// Create an empty surface labelled with `strings`
    #[must_use]
    pub fn new(strings: &'static Strings) -> Self {
        Self {
            strings,
            state: Mutex::new(MarkupState {
                input_enabled: true,
                ..Default::default()
            }),
        }
    }

    /// Whether the submit affordance is currently enabled
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.state.lock().input_enabled
    }

    /// Last published turn state
    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.state.lock().state
    }

    /// Render the conversation pane and the thinking panel
    #[must_use]
    pub fn to_html(&self) -> String {
        let state = self.state.lock();
        let mut html = String::new();

        html.push_str("<div id=\"messages\">\n");
        if state.messages.is_empty() && !state.typing {
            let _ = writeln!(
                html,
                "  <div id=\"empty\">{}</div>",
                escape_markup(self.strings.empty_conversation)
            );
        }
        for msg in &state.messages {
            let avatar = match msg.role {
                MessageRole::User => self.strings.user_label,
                MessageRole::Assistant => self.strings.assistant_label,
            };
            let _ = writeln!(
                html,
                "  <div class=\"msg {}\"><div class=\"avatar\">{}</div><div class=\"bubble\">{}</div></div>",
                msg.role.css_class(),
                escape_markup(avatar),
                escape_markup(&msg.text)
            );
        }
        if state.typing {
            let _ = writeln!(
                html,
                "  <div class=\"msg ai typing\"><div class=\"avatar\">{}</div><div class=\"bubble\"><span></span><span></span><span></span></div></div>",
                escape_markup(self.strings.assistant_label)
            );
        }
        html.push_str("</div>\n");

        html.push_str("<div id=\"think-log\">\n");
        if state.blocks.is_empty() {
            let _ = writeln!(
                html,
                "  <div id=\"think-empty\">{}</div>",
                escape_markup(self.strings.empty_thinking)
            );
        }
        for (turn, ids) in &state.blocks {
            let _ = writeln!(
                html,
                "  <div class=\"think-block\"><div class=\"think-turn-label\">{} {}</div><div class=\"think-entries\">",
                escape_markup(self.strings.turn_label),
                turn
            );
            for entry in ids.iter().filter_map(|id| state.entries.get(id)) {
                let cursor = if entry.variant.is_live() {
                    "<span class=\"think-cursor\"></span>"
                } else {
                    ""
                };
                let _ = writeln!(
                    html,
                    "    <div class=\"think-entry {}\"><span class=\"think-icon\">{}</span><span class=\"think-text\">{}{}</span></div>",
                    entry.variant.css_class(),
                    entry.variant.icon(),
                    escape_markup(&entry.text),
                    cursor
                );
            }
            html.push_str("  </div></div>\n");
        }
        html.push_str("</div>\n");
        html
    }
}

#[async_trait]
impl Surface for MarkupSurface {
    async fn render(&self, role: MessageRole, text: &str) -> MessageId {
        self.state.lock().messages.push(MarkupMessage {
            role,
            text: text.to_string(),
        });
        MessageId::new()
    }

    async fn show_placeholder(&self) {
        self.state.lock().typing = true;
    }

    async fn remove_placeholder(&self) {
        self.state.lock().typing = false;
    }

    async fn open_turn_block(&self, turn: TurnNumber) -> TurnBlock {
        self.state.lock().blocks.push((turn, Vec::new()));
        TurnBlock { turn }
    }

    async fn add_entry(&self, block: TurnBlock, text: &str, variant: EntryVariant) -> EntryId {
        let id = EntryId::new();
        let mut state = self.state.lock();
        match state.blocks.iter_mut().rev().find(|(turn, _)| *turn == block.turn) {
            Some((_, ids)) => ids.push(id),
            None => {
                tracing::warn!(turn = block.turn.0, "Entry added to unknown turn block");
                return id;
            }
        }
        state.entries.insert(
            id,
            MarkupEntry {
                text: text.to_string(),
                variant,
            },
        );
        id
    }

    async fn update_entry(&self, id: EntryId, text: &str) {
        if let Some(entry) = self.state.lock().entries.get_mut(&id) {
            if entry.variant.is_live() {
                entry.text = text.to_string();
                entry.variant = EntryVariant::Active;
            }
        }
    }

    async fn finish_entry(&self, id: EntryId) {
        if let Some(entry) = self.state.lock().entries.get_mut(&id) {
            entry.variant = EntryVariant::Done;
        }
    }

    async fn clear_input(&self) {}

    async fn set_input_enabled(&self, enabled: bool) {
        self.state.lock().input_enabled = enabled;
    }

    async fn focus_input(&self) {}

    async fn set_state(&self, state: TurnState) {
        self.state.lock().state = state;
    }
}
