//! Turn Coordinator
//!
//! Owns the interaction loop: one accepted submission is one turn. A turn
//! races the scripted thinking animation against the chat request and
//! reconciles both into a single output stream.
//!
//! # Turn Lifecycle
//!
//! ```text
//!  Idle ──submit──► Submitted ──► AwaitingReply ──┬─► RepliedOk ──────────┐
//!                                                 ├─► RepliedError ───────┼─► Idle
//!                                                 └─► RepliedNetworkFail ─┘
//! ```
//!
//! While `AwaitingReply`, the player and the transport call are polled by one
//! `tokio::join!`. The transport arm settles the [`CompletionSignal`] the
//! moment the call returns; the join then waits for the player to notice and
//! finish its entry, so no animation output can trail the outcome.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::animation::{Pacer, Playback, ScriptedPlayer, TokioPacer};
use crate::backend::{ChatOutcome, ChatRequest, ChatResponse, ChatTransport};
use crate::config::ChatConfig;
use crate::events::SurfaceEvent;
use crate::locale::Strings;
use crate::messages::{EntryVariant, MessageRole, TurnBlock, TurnNumber, TurnState};
use crate::signal::CompletionSignal;
use crate::sink::IncrementalEntry;
use crate::surface::Surface;

/// How a turn ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    /// The endpoint replied
    Replied {
        /// Reply text as rendered
        reply: String,
        /// Whether a reasoning trace was streamed
        streamed_thinking: bool,
    },
    /// The endpoint reported an application error
    ApiError(String),
    /// The request never produced a usable response
    NetworkFailure(String),
}

impl OutcomeKind {
    /// Short label for logs
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Replied { .. } => "replied",
            Self::ApiError(_) => "api_error",
            Self::NetworkFailure(_) => "network_failure",
        }
    }

    fn state(&self) -> TurnState {
        match self {
            Self::Replied { .. } => TurnState::RepliedOk,
            Self::ApiError(_) => TurnState::RepliedError,
            Self::NetworkFailure(_) => TurnState::RepliedNetworkFail,
        }
    }
}

/// Summary of one completed turn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Turn ordinal
    pub turn: TurnNumber,
    /// How the turn ended
    pub kind: OutcomeKind,
    /// What the thinking animation did
    pub playback: Playback,
    /// Time from request start to transport settlement
    pub latency: Duration,
}

/// Drives turns against a transport and a surface
pub struct TurnCoordinator<T: ChatTransport, S: Surface> {
    transport: T,
    surface: S,
    strings: &'static Strings,
    player: ScriptedPlayer,
    trace_char_delay: Duration,
    turns: u64,
    state: TurnState,
}

impl<T: ChatTransport, S: Surface> TurnCoordinator<T, S> {
    /// Create a coordinator paced by the tokio clock
    pub fn new(transport: T, surface: S, config: &ChatConfig) -> Self {
        Self::with_pacer(transport, surface, config, Arc::new(TokioPacer))
    }

    /// Create a coordinator with an explicit pacer
    pub fn with_pacer(
        transport: T,
        surface: S,
        config: &ChatConfig,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        let strings = config.locale.strings();
        Self {
            transport,
            surface,
            strings,
            player: ScriptedPlayer::new(strings.thinking_phrases, config.pacing.clone(), pacer),
            trace_char_delay: config.pacing.trace_char_delay(),
            turns: 0,
            state: TurnState::Idle,
        }
    }

    /// Current turn state
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Number of turns accepted so far
    #[must_use]
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// The surface this coordinator renders into
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Process surface events until quit or until the channel closes
    pub async fn run(&mut self, mut events: mpsc::Receiver<SurfaceEvent>) {
        tracing::info!(transport = self.transport.name(), "Turn coordinator started");

        while let Some(event) = events.recv().await {
            match event {
                SurfaceEvent::UserMessage { content } => {
                    self.submit(&content).await;
                }
                SurfaceEvent::QuitRequested => {
                    tracing::info!("Quit requested");
                    break;
                }
            }
        }

        tracing::info!(turns = self.turns, "Turn coordinator stopped");
    }

    /// Run one turn for `text`
    ///
    /// Returns `None`, having touched nothing, when `text` is blank. Every
    /// accepted turn ends with input enabled and focused, whatever the
    /// transport did.
    pub async fn submit(&mut self, text: &str) -> Option<TurnOutcome> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        self.set_state(TurnState::Submitted).await;
        self.surface.clear_input().await;
        self.surface.set_input_enabled(false).await;
        self.surface.render(MessageRole::User, message).await;
        self.surface.show_placeholder().await;

        self.turns += 1;
        let turn = TurnNumber(self.turns);
        let block = self.surface.open_turn_block(turn).await;
        self.set_state(TurnState::AwaitingReply).await;

        let signal = CompletionSignal::new();
        let observer = signal.observer();
        let request = ChatRequest::new(message);
        let started = Instant::now();

        let transport = &self.transport;
        let exchange = async move {
            let result = transport.send(&request).await;
            signal.settle();
            (result, started.elapsed())
        };
        let animation = self.player.run(&self.surface, block, observer);

        let (playback, (result, latency)) = tokio::join!(animation, exchange);

        self.surface.remove_placeholder().await;

        let kind = match result.map(ChatResponse::classify) {
            Ok(ChatOutcome::Failed(error)) => self.render_api_error(block, error).await,
            Ok(ChatOutcome::Replied { reply, thinking }) => {
                self.render_reply(block, reply, thinking).await
            }
            Err(e) => {
                tracing::warn!(turn = turn.0, error = %e, "Chat request failed");
                self.render_network_failure(block, e.to_string()).await
            }
        };

        tracing::info!(
            turn = turn.0,
            outcome = kind.label(),
            elapsed_ms = latency.as_millis() as u64,
            entries = playback.entries_opened,
            "chat completion took {:.2}s",
            latency.as_secs_f64()
        );

        self.set_state(kind.state()).await;
        self.surface.set_input_enabled(true).await;
        self.surface.focus_input().await;
        self.set_state(TurnState::Idle).await;

        Some(TurnOutcome {
            turn,
            kind,
            playback,
            latency,
        })
    }

    async fn render_api_error(&self, block: TurnBlock, error: String) -> OutcomeKind {
        self.surface
            .render(MessageRole::Assistant, &self.strings.error_message(&error))
            .await;
        self.surface
            .add_entry(block, self.strings.api_error_entry, EntryVariant::Info)
            .await;
        OutcomeKind::ApiError(error)
    }

    async fn render_reply(
        &self,
        block: TurnBlock,
        reply: String,
        thinking: Option<String>,
    ) -> OutcomeKind {
        self.surface.render(MessageRole::Assistant, &reply).await;

        let streamed_thinking = thinking.is_some();
        if let Some(thinking) = thinking {
            let mut entry = IncrementalEntry::open(&self.surface, block).await;
            entry
                .stream(&thinking, self.player.pacer(), self.trace_char_delay)
                .await;
        }

        self.surface
            .add_entry(block, self.strings.reply_delivered_entry, EntryVariant::Done)
            .await;
        OutcomeKind::Replied {
            reply,
            streamed_thinking,
        }
    }

    async fn render_network_failure(&self, block: TurnBlock, error: String) -> OutcomeKind {
        self.surface
            .render(MessageRole::Assistant, self.strings.network_error_message)
            .await;
        self.surface
            .add_entry(block, self.strings.network_error_entry, EntryVariant::Info)
            .await;
        OutcomeKind::NetworkFailure(error)
    }

    async fn set_state(&mut self, state: TurnState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "Turn state");
        }
        self.state = state;
        self.surface.set_state(state).await;
    }
}
