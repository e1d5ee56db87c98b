//! Surface Events
//!
//! Events sent from UI surfaces to the turn coordinator. Surfaces only report
//! what the user did; the coordinator decides what happens next.

use serde::{Deserialize, Serialize};

/// Events from a UI surface to the coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// User submitted the input box
    UserMessage {
        /// Raw input text (trimming is the coordinator's job)
        content: String,
    },

    /// User asked to quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Build a user message event
    pub fn message(content: impl Into<String>) -> Self {
        Self::UserMessage {
            content: content.into(),
        }
    }
}
