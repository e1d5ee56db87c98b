//! Integration Tests for TUI + Coordinator
//!
//! These tests drive the App the way a user would (key presses) against a
//! coordinator running on its own task, with a mock transport standing in for
//! the chat endpoint.
//!
//! # Test Coverage
//!
//! 1. **Message Exchange**: user sends a message, the reply lands in the pane
//! 2. **Input Locking**: typing is ignored while a turn is in flight
//! 3. **Rendering**: the final state draws both panes
//! 4. **Quit**: Esc stops the app and the coordinator

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::Notify;
use tokio::time::timeout;

use thinkchat_core::{
    ChatConfig, ChatRequest, ChatResponse, ChatTransport, InstantPacer, Locale, MessageRole,
    TransportError, TurnState,
};
use thinkchat_tui::coordinator_client::CoordinatorClient;
use thinkchat_tui::display::DisplayState;
use thinkchat_tui::App;

// ============================================================================
// Mock Transport
// ============================================================================

/// Replies with a fixed text, optionally holding each reply until released
struct MockTransport {
    reply: String,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicUsize>,
}

impl MockTransport {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            gate: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn gated(reply: &str, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::replying(reply)
        }
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(ChatResponse::reply(self.reply.clone()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn app_with(transport: MockTransport) -> App {
    let mut config = ChatConfig::default();
    config.locale = Locale::English;
    let client = CoordinatorClient::spawn_with_pacer(transport, &config, Arc::new(InstantPacer));
    App::new(client, config.locale.strings())
}

async fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .await;
    }
}

async fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).await;
}

/// Apply coordinator messages until `done` holds
async fn pump_until<F>(app: &mut App, done: F)
where
    F: Fn(&DisplayState) -> bool,
{
    timeout(Duration::from_secs(5), async {
        while !done(app.display()) {
            assert!(app.process_next_message().await, "coordinator stopped early");
        }
    })
    .await
    .expect("timed out waiting for coordinator");
}

fn turn_finished(display: &DisplayState) -> bool {
    display.turn_state == TurnState::Idle
        && display
            .messages
            .iter()
            .any(|m| m.role == MessageRole::Assistant)
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_message_exchange() {
    let mut app = app_with(MockTransport::replying("hi there"));

    type_text(&mut app, "hello").await;
    assert_eq!(app.input(), "hello");
    press(&mut app, KeyCode::Enter).await;

    pump_until(&mut app, turn_finished).await;

    let messages: Vec<_> = app
        .display()
        .messages
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (MessageRole::User, "hello"),
            (MessageRole::Assistant, "hi there"),
        ]
    );
    assert_eq!(app.input(), "");
    assert!(app.display().input_enabled);
    assert!(!app.display().typing);
    assert_eq!(app.display().turns.len(), 1);
    assert!(!app.display().has_live_entries());
}

#[tokio::test]
async fn test_blank_input_not_sent() {
    let transport = MockTransport::replying("unused");
    let calls = Arc::clone(&transport.calls);
    let mut app = app_with(transport);

    type_text(&mut app, "   ").await;
    press(&mut app, KeyCode::Enter).await;

    assert!(app.display().input_enabled);
    assert_eq!(app.input(), "   ");
    tokio::task::yield_now().await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_input_locked_while_awaiting_reply() {
    let gate = Arc::new(Notify::new());
    let mut app = app_with(MockTransport::gated("done", Arc::clone(&gate)));

    type_text(&mut app, "first").await;
    press(&mut app, KeyCode::Enter).await;
    pump_until(&mut app, |d| d.typing).await;

    assert!(!app.display().input_enabled);
    assert_eq!(app.input(), "");

    // Keystrokes and submits are ignored until the turn ends
    type_text(&mut app, "second").await;
    press(&mut app, KeyCode::Enter).await;
    assert_eq!(app.input(), "");

    gate.notify_one();
    pump_until(&mut app, turn_finished).await;

    assert!(app.display().input_enabled);
    assert_eq!(app.display().messages.len(), 2);
}

#[tokio::test]
async fn test_shift_enter_inserts_newline() {
    let mut app = app_with(MockTransport::replying("ok"));

    type_text(&mut app, "a").await;
    app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT))
        .await;
    type_text(&mut app, "b").await;
    press(&mut app, KeyCode::Backspace).await;

    assert_eq!(app.input(), "a\n");
    assert!(app.display().input_enabled);
}

#[tokio::test]
async fn test_render_after_exchange() {
    let mut app = app_with(MockTransport::replying("hi there"));
    type_text(&mut app, "hello").await;
    press(&mut app, KeyCode::Enter).await;
    pump_until(&mut app, turn_finished).await;

    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("U: hello"), "{screen}");
    assert!(screen.contains("AI: hi there"), "{screen}");
    assert!(screen.contains("turn 1"), "{screen}");
    assert!(screen.contains("Reply delivered."), "{screen}");
    assert!(screen.contains("Ready"), "{screen}");
}

#[tokio::test]
async fn test_empty_screen_shows_prompts() {
    let mut app = app_with(MockTransport::replying("unused"));

    let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();

    let screen = screen_text(&terminal);
    assert!(screen.contains("Start a conversation"), "{screen}");
    assert!(screen.contains("Type a message..."), "{screen}");
}

#[tokio::test]
async fn test_escape_quits() {
    let mut app = app_with(MockTransport::replying("unused"));

    press(&mut app, KeyCode::Esc).await;
    assert!(!app.is_running());

    // Coordinator winds down and closes its channel
    let stopped = timeout(Duration::from_secs(5), async {
        while app.process_next_message().await {}
    })
    .await;
    assert!(stopped.is_ok());
}
