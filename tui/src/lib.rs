//! thinkchat TUI - Terminal Surface
//!
//! A thin ratatui client for the turn coordinator: the conversation on the
//! left, the thinking trace on the right, the input box below.

pub mod app;
pub mod coordinator_client;
pub mod display;
pub mod headless;
pub mod theme;
pub mod widgets;

pub use app::App;
