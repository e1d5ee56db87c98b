//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - CoordinatorClient for orchestration
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the coordinator task via CoordinatorClient
//! 3. Receives CoordinatorMessages and updates DisplayState
//! 4. Renders based on DisplayState

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::event::{MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;
use unicode_width::UnicodeWidthStr;

use thinkchat_core::{CoordinatorMessage, MessageRole, Strings};

use crate::coordinator_client::CoordinatorClient;
use crate::display::DisplayState;
use crate::theme::{self, DIM_GRAY, SCROLL_YELLOW, TURN_LABEL, TYPING_GRAY};
use crate::widgets::{wrap_rows, StyledLine, TextBlock, TextBlockState};

/// Target ~10 FPS for the typing dots and streaming cursor
const FRAME_DURATION: Duration = Duration::from_millis(100);

/// Maximum input box height (lines)
const MAX_INPUT_HEIGHT: u16 = 5;

/// Share of the main area given to the conversation pane
const CONVERSATION_PERCENT: u16 = 62;

/// Rows per mouse wheel notch
const WHEEL_ROWS: usize = 3;

/// Input prompt
const PROMPT: &str = "> ";

/// Streaming cursor shown after live thinking entries
const STREAM_CURSOR: &str = "▌";

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Coordinator Integration ===
    /// Client for the coordinator task
    client: CoordinatorClient,
    /// Display state derived from CoordinatorMessages
    display: DisplayState,
    /// Locale string table
    strings: &'static Strings,

    // === Input State ===
    /// User input buffer
    input_buffer: String,

    // === Scroll State ===
    /// Conversation pane
    conversation: TextBlockState,
    /// Thinking panel
    thinking: TextBlockState,
    /// Main area height at the last draw (for paging)
    main_height: u16,

    /// Last frame time (for animations)
    last_frame: Instant,
}

impl App {
    /// Create a new App around a running coordinator client
    pub fn new(client: CoordinatorClient, strings: &'static Strings) -> Self {
        Self {
            running: true,
            client,
            display: DisplayState::new(),
            strings,
            input_buffer: String::new(),
            conversation: TextBlockState::default(),
            thinking: TextBlockState::default(),
            main_height: 0,
            last_frame: Instant::now(),
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_DURATION);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event).await,
                    Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                    None => self.running = false,
                },

                // Coordinator updates
                maybe_msg = self.client.recv() => match maybe_msg {
                    Some(msg) => self.apply(msg),
                    None => {
                        tracing::info!("Coordinator stopped, leaving");
                        self.running = false;
                    }
                },

                // Frame tick - keeps animations moving while idle
                _ = frames.tick() => {}
            }

            // Drain whatever else arrived so one draw covers the burst
            for msg in self.client.recv_all() {
                self.apply(msg);
            }

            self.update();
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Wait for one coordinator message and apply it
    ///
    /// Returns `false` once the coordinator has stopped.
    pub async fn process_next_message(&mut self) -> bool {
        match self.client.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Current input buffer
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Apply a coordinator message to the display state
    fn apply(&mut self, msg: CoordinatorMessage) {
        self.display.apply_message(msg);
        if self.display.take_input_clear() {
            self.input_buffer.clear();
        }
    }

    /// Dispatch a terminal event
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        let page = self.page_rows();
        match key.code {
            // Quit
            KeyCode::Esc => self.quit().await,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit().await;
            }

            // Newline vs submit
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                if self.display.input_enabled {
                    self.input_buffer.push('\n');
                }
            }
            KeyCode::Enter => self.submit().await,

            // Typing
            KeyCode::Char(c) if self.display.input_enabled => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace if self.display.input_enabled => {
                self.input_buffer.pop();
            }

            // Scrolling
            KeyCode::PageUp if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.thinking.scroll_up(page);
            }
            KeyCode::PageDown if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.thinking.scroll_down(page);
            }
            KeyCode::PageUp => self.conversation.scroll_up(page),
            KeyCode::PageDown => self.conversation.scroll_down(page),
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.conversation.scroll_to_bottom();
                self.thinking.scroll_to_bottom();
            }

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.conversation.scroll_up(WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.conversation.scroll_down(WHEEL_ROWS),
            _ => {}
        }
    }

    /// Send the input buffer as a user message
    ///
    /// The buffer stays until the coordinator asks for it to be cleared.
    async fn submit(&mut self) {
        if !self.display.input_enabled || self.input_buffer.trim().is_empty() {
            return;
        }

        // Lock input until the coordinator takes over
        self.display.input_enabled = false;
        self.conversation.scroll_to_bottom();
        self.thinking.scroll_to_bottom();

        if let Err(e) = self.client.send_message(self.input_buffer.clone()).await {
            tracing::warn!("Failed to submit message: {}", e);
            self.display.input_enabled = true;
        }
    }

    async fn quit(&mut self) {
        if let Err(e) = self.client.request_quit().await {
            tracing::debug!("Quit not delivered: {}", e);
        }
        self.running = false;
    }

    /// Update animations
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);
    }

    fn page_rows(&self) -> usize {
        usize::from((self.main_height / 2).max(1))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draw the whole UI into `frame`
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let input_lines = self.input_lines(area.width);
        let input_height = u16::try_from(input_lines.len())
            .unwrap_or(MAX_INPUT_HEIGHT)
            .clamp(1, MAX_INPUT_HEIGHT);

        let [main, separator, input, status] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .areas(area);
        self.main_height = main.height;

        let [conversation, divider, thinking] = Layout::horizontal([
            Constraint::Percentage(CONVERSATION_PERCENT),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(main);

        // Conversation pane
        let lines = conversation_lines(&self.display, self.strings);
        frame.render_stateful_widget(TextBlock::new(&lines), conversation, &mut self.conversation);

        // Divider
        let bar: Vec<Line> = (0..divider.height)
            .map(|_| Line::styled("│", Style::default().fg(DIM_GRAY)))
            .collect();
        frame.render_widget(Paragraph::new(bar), divider);

        // Thinking panel
        let lines = thinking_lines(&self.display, self.strings);
        frame.render_stateful_widget(TextBlock::new(&lines), thinking, &mut self.thinking);

        // Separator
        frame.render_widget(
            Paragraph::new("─".repeat(usize::from(separator.width)))
                .style(Style::default().fg(DIM_GRAY)),
            separator,
        );

        // Input
        let mut input_state = TextBlockState::default();
        frame.render_stateful_widget(TextBlock::new(&input_lines), input, &mut input_state);
        if self.display.input_enabled {
            let placeholder = self.input_buffer.is_empty();
            frame.set_cursor_position(input_cursor(&input_lines, input, placeholder));
        }

        // Status bar
        frame.render_widget(self.status_line(status.width), status);
    }

    fn input_lines(&self, width: u16) -> Vec<StyledLine> {
        let style = if self.display.input_enabled {
            Style::default()
        } else {
            Style::default().fg(DIM_GRAY)
        };

        if self.input_buffer.is_empty() {
            return vec![StyledLine::new(
                format!("{PROMPT}{}", self.strings.input_placeholder),
                Style::default().fg(DIM_GRAY),
            )];
        }

        let text_width = usize::from(width).saturating_sub(PROMPT.width()).max(1);
        let indent = " ".repeat(PROMPT.width());
        let mut lines = Vec::new();
        for (i, logical) in self.input_buffer.split('\n').enumerate() {
            for (j, row) in wrap_rows(logical, text_width).into_iter().enumerate() {
                let prefix = if i == 0 && j == 0 { PROMPT } else { indent.as_str() };
                lines.push(StyledLine::new(format!("{prefix}{row}"), style));
            }
        }
        lines
    }

    fn status_line(&self, width: u16) -> Paragraph<'static> {
        let state = self.display.turn_state;
        let state_style = if state.is_busy() {
            Style::default().fg(theme::THINK_ACTIVE)
        } else {
            Style::default().fg(DIM_GRAY)
        };

        let mut spans = vec![Span::styled(format!(" {}", state.description()), state_style)];
        if self.conversation.scroll_offset > 0 {
            spans.push(Span::styled(
                format!("  ↑{}", self.conversation.scroll_offset),
                Style::default().fg(SCROLL_YELLOW),
            ));
        }

        let hints = "Enter send · Shift+Enter newline · PgUp/PgDn scroll · Esc quit ";
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let pad = usize::from(width).saturating_sub(used + hints.width());
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
            spans.push(Span::styled(hints, Style::default().fg(DIM_GRAY)));
        }

        Paragraph::new(Line::from(spans))
    }
}

/// Lines for the conversation pane
pub fn conversation_lines(display: &DisplayState, strings: &Strings) -> Vec<StyledLine> {
    if display.is_empty() {
        return vec![StyledLine::new(
            strings.empty_conversation,
            Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC),
        )];
    }

    let mut lines = Vec::new();
    for msg in &display.messages {
        let label = match msg.role {
            MessageRole::User => strings.user_label,
            MessageRole::Assistant => strings.assistant_label,
        };
        let style = theme::message_style(msg.role, &msg.content, strings.error_marker);
        let indent = " ".repeat(label.width() + 2);

        for (i, row) in msg.content.split('\n').enumerate() {
            let text = if i == 0 {
                format!("{label}: {row}")
            } else {
                format!("{indent}{row}")
            };
            lines.push(StyledLine::new(text, style));
        }
        lines.push(StyledLine::blank());
    }

    if display.typing {
        lines.push(StyledLine::new(
            format!("{}: {}", strings.assistant_label, display.typing_dots()),
            Style::default().fg(TYPING_GRAY),
        ));
    } else {
        lines.pop();
    }

    lines
}

/// Lines for the thinking panel
pub fn thinking_lines(display: &DisplayState, strings: &Strings) -> Vec<StyledLine> {
    if display.turns.is_empty() {
        return vec![StyledLine::new(
            strings.empty_thinking,
            Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC),
        )];
    }

    let mut lines = Vec::new();
    for (i, block) in display.turns.iter().enumerate() {
        if i > 0 {
            lines.push(StyledLine::blank());
        }
        lines.push(StyledLine::new(
            format!("── {} {} ──", strings.turn_label, block.turn),
            Style::default().fg(TURN_LABEL),
        ));
        for entry in &block.entries {
            let cursor = if entry.variant.is_live() { STREAM_CURSOR } else { "" };
            lines.push(StyledLine::new(
                format!("{} {}{}", entry.variant.icon(), entry.text, cursor),
                theme::entry_style(entry.variant),
            ));
        }
    }
    lines
}

/// Cursor position after the last input row
fn input_cursor(lines: &[StyledLine], area: Rect, placeholder: bool) -> (u16, u16) {
    let last = match lines.last() {
        Some(line) if !placeholder => line.text.width(),
        _ => PROMPT.width(),
    };
    let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let x = area.x + u16::try_from(last).unwrap_or(u16::MAX).min(area.width.saturating_sub(1));
    let y = area.y + rows.saturating_sub(1);
    (x, y)
}
