//! thinkchat Core - Headless Turn Orchestration
//!
//! This crate drives a chat client's interaction loop without knowing how
//! anything is drawn. While a reply is in flight it streams a scripted
//! "thinking" trace, then reconciles that animation with the real network
//! result into one coherent output stream.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surfaces                           │
//! │   ┌──────────────┐   ┌───────────────┐   ┌────────────────┐   │
//! │   │ TUI (ratatui)│   │ MarkupSurface │   │ test recorders │   │
//! │   └──────┬───────┘   └───────┬───────┘   └───────┬────────┘   │
//! │          └───────────────────┴───────────────────┘            │
//! │                 SurfaceEvent (up)   Surface calls (down)       │
//! └─────────────────────────────┼──────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┼──────────────────────────────────┐
//! │                     TurnCoordinator                             │
//! │   ┌────────────────┐   join!   ┌──────────────────────────┐     │
//! │   │ ScriptedPlayer │◄─────────►│ ChatTransport (HTTP)     │     │
//! │   └───────┬────────┘           └────────────┬─────────────┘     │
//! │           │ observes                        │ settles           │
//! │           └────────── CompletionSignal ◄────┘                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`TurnCoordinator`]: runs turns and owns the turn counter
//! - [`Surface`]: presentation collaborator (render, placeholder, entries, input)
//! - [`ChatTransport`]: the network call, [`HttpTransport`] in production
//! - [`ScriptedPlayer`]: the cancellable thinking animation
//! - [`CompletionSignal`]: fire-once flag that stops the animation
//! - [`IncrementalEntry`]: a thinking entry that grows while text streams in
//!
//! # Quick Start
//!
//! ```ignore
//! use thinkchat_core::{
//!     load_config, ChannelSurface, HttpTransport, SurfaceEvent, TurnCoordinator,
//! };
//! use tokio::sync::mpsc;
//!
//! let config = load_config()?;
//! let transport = HttpTransport::new(&config.endpoint, config.request_timeout())?;
//!
//! let (msg_tx, mut msg_rx) = mpsc::channel(256);
//! let (event_tx, event_rx) = mpsc::channel(32);
//! let mut coordinator = TurnCoordinator::new(transport, ChannelSurface::new(msg_tx), &config);
//!
//! tokio::spawn(async move { coordinator.run(event_rx).await });
//! event_tx.send(SurfaceEvent::message("こんにちは")).await?;
//! while let Some(msg) = msg_rx.recv().await {
//!     // fold into display state
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod backend;
pub mod config;
pub mod coordinator;
pub mod events;
pub mod locale;
pub mod messages;
pub mod render;
pub mod signal;
pub mod sink;
pub mod surface;

pub use animation::{
    DelayRange, InstantPacer, Pacer, Pacing, Playback, ScriptedPlayer, TokioPacer,
};
pub use backend::{
    ChatOutcome, ChatRequest, ChatResponse, ChatTransport, HttpTransport, TransportError,
};
pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_path, ChatConfig,
    ConfigError, ConfigOverrides, ConfigSource,
};
pub use coordinator::{OutcomeKind, TurnCoordinator, TurnOutcome};
pub use events::SurfaceEvent;
pub use locale::{Locale, Strings, UnknownLocale};
pub use messages::{
    CoordinatorMessage, EntryId, EntryVariant, MessageId, MessageRole, TurnBlock, TurnNumber,
    TurnState,
};
pub use render::{escape_markup, MarkupSurface};
pub use signal::{CompletionObserver, CompletionSignal};
pub use sink::IncrementalEntry;
pub use surface::{ChannelSurface, Surface};
