//! Coordinator Client
//!
//! Thin wrapper around the turn coordinator for TUI integration.
//! The coordinator runs on its own task so the render loop keeps drawing
//! while a turn is in flight.
//!
//! # Architecture
//!
//! The TUI is a "thin client": it doesn't contain any turn logic.
//! All orchestration happens in the coordinator. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to the coordinator
//! 3. Receive CoordinatorMessages
//! 4. Render display state based on messages

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use thinkchat_core::{
    ChannelSurface, ChatConfig, ChatTransport, CoordinatorMessage, Pacer, SurfaceEvent,
    TurnCoordinator,
};

/// Coordinator -> TUI buffer; one turn produces a few hundred updates
const MESSAGE_BUFFER: usize = 512;
/// TUI -> coordinator buffer
const EVENT_BUFFER: usize = 32;

/// Client for communicating with a spawned turn coordinator
pub struct CoordinatorClient {
    /// Events to the coordinator
    events: mpsc::Sender<SurfaceEvent>,
    /// Messages from the coordinator
    rx: mpsc::Receiver<CoordinatorMessage>,
    /// Coordinator task
    task: JoinHandle<()>,
}

impl CoordinatorClient {
    /// Spawn a coordinator over `transport` with real-time pacing
    pub fn spawn<T>(transport: T, config: &ChatConfig) -> Self
    where
        T: ChatTransport + 'static,
    {
        Self::spawn_with(|surface| TurnCoordinator::new(transport, surface, config))
    }

    /// Spawn a coordinator with a custom pacer (tests use `InstantPacer`)
    pub fn spawn_with_pacer<T>(transport: T, config: &ChatConfig, pacer: Arc<dyn Pacer>) -> Self
    where
        T: ChatTransport + 'static,
    {
        Self::spawn_with(|surface| TurnCoordinator::with_pacer(transport, surface, config, pacer))
    }

    fn spawn_with<T, F>(build: F) -> Self
    where
        T: ChatTransport + 'static,
        F: FnOnce(ChannelSurface) -> TurnCoordinator<T, ChannelSurface>,
    {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        let (events, event_rx) = mpsc::channel(EVENT_BUFFER);

        let mut coordinator = build(ChannelSurface::new(tx));
        let task = tokio::spawn(async move {
            coordinator.run(event_rx).await;
        });

        Self { events, rx, task }
    }

    /// Send a user message to the coordinator
    pub async fn send_message(&self, content: String) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::message(content)).await
    }

    /// Notify the coordinator that the user wants to quit
    pub async fn request_quit(&self) -> anyhow::Result<()> {
        self.send_event(SurfaceEvent::QuitRequested).await
    }

    /// Send a raw surface event to the coordinator
    pub async fn send_event(&self, event: SurfaceEvent) -> anyhow::Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| anyhow::anyhow!("Turn coordinator has stopped"))
    }

    /// Wait for the next message; `None` once the coordinator has stopped
    pub async fn recv(&mut self) -> Option<CoordinatorMessage> {
        self.rx.recv().await
    }

    /// Receive all pending messages from the coordinator (non-blocking)
    pub fn recv_all(&mut self) -> Vec<CoordinatorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Check whether the coordinator task is still alive
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
