//! Thinking Animation
//!
//! While a reply is in flight there is no real reasoning trace to show, so the
//! [`ScriptedPlayer`] streams a fixed list of phrases into the turn's thinking
//! panel at a jittered, human-looking pace.
//!
//! # Cancellation
//!
//! The player never owns its lifetime. It watches a [`CompletionObserver`] and
//! checks it before every phrase and every character; every pause is raced
//! against settlement so the player wakes as soon as the reply lands. A phrase
//! cut short is still finished, so no entry is left with a live cursor.
//!
//! ```text
//! phrase 1: 考 考え 考え中 ... ✓   (phrase delay)
//! phrase 2: 生 生成 ──settled──► ✓  stop
//! ```
//!
//! Once every phrase has played the player returns and the panel stays quiet
//! until the reply arrives.

mod timing;

pub use timing::{DelayRange, InstantPacer, InvalidDelayRange, Pacer, Pacing, TokioPacer};

use std::sync::Arc;
use std::time::Duration;

use crate::messages::TurnBlock;
use crate::signal::CompletionObserver;
use crate::sink::IncrementalEntry;
use crate::surface::Surface;

/// What a playback run did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Playback {
    /// Number of entries the player opened
    pub entries_opened: usize,
    /// Whether settlement cut the run short
    pub interrupted: bool,
}

/// Streams a fixed phrase list into a turn block until told to stop
#[derive(Clone)]
pub struct ScriptedPlayer {
    phrases: &'static [&'static str],
    pacing: Pacing,
    pacer: Arc<dyn Pacer>,
}

impl ScriptedPlayer {
    /// Create a player for `phrases`
    pub fn new(phrases: &'static [&'static str], pacing: Pacing, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            phrases,
            pacing,
            pacer,
        }
    }

    /// The pacer used for every wait
    #[must_use]
    pub fn pacer(&self) -> &dyn Pacer {
        self.pacer.as_ref()
    }

    /// Play the phrases into `block` until exhausted or `observer` settles
    pub async fn run<S: Surface + ?Sized>(
        &self,
        surface: &S,
        block: TurnBlock,
        observer: CompletionObserver,
    ) -> Playback {
        let mut playback = Playback::default();
        let mut utf8 = [0u8; 4];

        for phrase in self.phrases {
            if observer.is_settled() {
                playback.interrupted = true;
                break;
            }

            let mut entry = IncrementalEntry::open(surface, block).await;
            playback.entries_opened += 1;

            for ch in phrase.chars() {
                if observer.is_settled() {
                    playback.interrupted = true;
                    break;
                }
                entry.append(ch.encode_utf8(&mut utf8)).await;
                self.pause(self.pacing.char_delay(), &observer).await;
            }

            entry.finish().await;

            if observer.is_settled() {
                playback.interrupted = true;
                break;
            }
            self.pause(self.pacing.phrase_delay(), &observer).await;
        }

        tracing::debug!(
            turn = block.turn.0,
            entries = playback.entries_opened,
            interrupted = playback.interrupted,
            "Thinking animation stopped"
        );
        playback
    }

    /// Wait for `duration`, returning early if the observer settles
    async fn pause(&self, duration: Duration, observer: &CompletionObserver) {
        tokio::select! {
            biased;
            () = observer.settled() => {}
            () = self.pacer.pause(duration) => {}
        }
    }
}
