//! Presentation Surface
//!
//! The coordinator and the animation player never draw anything themselves.
//! They call a [`Surface`], which owns the message list, the typing
//! placeholder, the thinking panel and the input box.
//!
//! [`ChannelSurface`] is the surface used by interactive front ends: it turns
//! every call into a [`CoordinatorMessage`] and forwards it over an mpsc
//! channel to whatever is rendering (the terminal UI, a test harness).

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::messages::{
    CoordinatorMessage, EntryId, EntryVariant, MessageId, MessageRole, TurnBlock, TurnNumber,
    TurnState,
};

/// Presentation collaborator consumed by the coordinator and the player
///
/// None of these operations can fail from the caller's point of view; a
/// surface that loses its renderer logs and carries on.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Append a chat message and scroll to it
    async fn render(&self, role: MessageRole, text: &str) -> MessageId;

    /// Show the transient "typing" placeholder
    async fn show_placeholder(&self);

    /// Remove the "typing" placeholder
    async fn remove_placeholder(&self);

    /// Open a new block in the thinking panel for `turn`
    async fn open_turn_block(&self, turn: TurnNumber) -> TurnBlock;

    /// Append a thinking entry to `block`
    async fn add_entry(&self, block: TurnBlock, text: &str, variant: EntryVariant) -> EntryId;

    /// Replace a live entry's text with the full accumulated buffer
    async fn update_entry(&self, id: EntryId, text: &str);

    /// Drop a live entry's cursor and mark it done
    async fn finish_entry(&self, id: EntryId);

    /// Clear the input box
    async fn clear_input(&self);

    /// Enable or disable the submit affordance
    async fn set_input_enabled(&self, enabled: bool);

    /// Return focus to the input box
    async fn focus_input(&self);

    /// Publish the coordinator's turn state
    async fn set_state(&self, state: TurnState);
}

/// Surface that forwards every operation as a [`CoordinatorMessage`]
#[derive(Clone, Debug)]
pub struct ChannelSurface {
    tx: mpsc::Sender<CoordinatorMessage>,
}

impl ChannelSurface {
    /// Create a surface writing into `tx`
    pub fn new(tx: mpsc::Sender<CoordinatorMessage>) -> Self {
        Self { tx }
    }

    /// Send a message to the renderer
    async fn send(&self, msg: CoordinatorMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}

#[async_trait]
impl Surface for ChannelSurface {
    async fn render(&self, role: MessageRole, text: &str) -> MessageId {
        let id = MessageId::new();
        self.send(CoordinatorMessage::Message {
            id: id.clone(),
            role,
            content: text.to_string(),
        })
        .await;
        id
    }

    async fn show_placeholder(&self) {
        self.send(CoordinatorMessage::TypingShown).await;
    }

    async fn remove_placeholder(&self) {
        self.send(CoordinatorMessage::TypingRemoved).await;
    }

    async fn open_turn_block(&self, turn: TurnNumber) -> TurnBlock {
        self.send(CoordinatorMessage::TurnOpened { turn }).await;
        TurnBlock { turn }
    }

    async fn add_entry(&self, block: TurnBlock, text: &str, variant: EntryVariant) -> EntryId {
        let id = EntryId::new();
        self.send(CoordinatorMessage::EntryAdded {
            id,
            turn: block.turn,
            text: text.to_string(),
            variant,
        })
        .await;
        id
    }

    async fn update_entry(&self, id: EntryId, text: &str) {
        self.send(CoordinatorMessage::EntryUpdated {
            id,
            text: text.to_string(),
        })
        .await;
    }

    async fn finish_entry(&self, id: EntryId) {
        self.send(CoordinatorMessage::EntryFinished { id }).await;
    }

    async fn clear_input(&self) {
        self.send(CoordinatorMessage::InputCleared).await;
    }

    async fn set_input_enabled(&self, enabled: bool) {
        self.send(CoordinatorMessage::InputEnabled { enabled }).await;
    }

    async fn focus_input(&self) {
        self.send(CoordinatorMessage::InputFocused).await;
    }

    async fn set_state(&self, state: TurnState) {
        self.send(CoordinatorMessage::State { state }).await;
    }
}
