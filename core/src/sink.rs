//! Incremental Text Sink
//!
//! A thinking entry that grows while text streams into it. The sink owns the
//! accumulated buffer and re-renders all of it on every append, so a surface
//! only ever needs the latest full text (no diffing).
//!
//! ```text
//! open() ──► Open ──append()*──► Open ──finish()──► Closed
//!                                                    │
//!                         append()/finish() ignored ◄┘
//! ```

use std::time::Duration;

use crate::animation::Pacer;
use crate::messages::{EntryId, EntryVariant, TurnBlock};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SinkState {
    Open,
    Closed,
}

/// A live thinking entry fed chunk by chunk
pub struct IncrementalEntry<'a, S: Surface + ?Sized> {
    surface: &'a S,
    id: EntryId,
    buffer: String,
    state: SinkState,
}

impl<'a, S: Surface + ?Sized> IncrementalEntry<'a, S> {
    /// Add a new pending entry (cursor only) to `block`
    pub async fn open(surface: &'a S, block: TurnBlock) -> Self {
        let id = surface.add_entry(block, "", EntryVariant::Pending).await;
        Self {
            surface,
            id,
            buffer: String::new(),
            state: SinkState::Open,
        }
    }

    /// Surface identifier of this entry
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Text accumulated so far
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether `finish` has been called
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == SinkState::Closed
    }

    /// Append a chunk and re-render the whole buffer
    ///
    /// Returns `false` (and renders nothing) once the entry is finished.
    pub async fn append(&mut self, chunk: &str) -> bool {
        if self.state == SinkState::Closed {
            return false;
        }
        self.buffer.push_str(chunk);
        self.surface.update_entry(self.id, &self.buffer).await;
        true
    }

    /// Close the entry: cursor removed, variant flipped to done
    ///
    /// Safe to call any number of times; only the first call renders.
    pub async fn finish(&mut self) {
        if self.state == SinkState::Closed {
            return;
        }
        self.state = SinkState::Closed;
        self.surface.finish_entry(self.id).await;
    }

    /// Stream `text` one character at a time at a fixed pace, then finish
    pub async fn stream(&mut self, text: &str, pacer: &dyn Pacer, delay: Duration) {
        let mut utf8 = [0u8; 4];
        for ch in text.chars() {
            if !self.append(ch.encode_utf8(&mut utf8)).await {
                break;
            }
            pacer.pause(delay).await;
        }
        self.finish().await;
    }
}
