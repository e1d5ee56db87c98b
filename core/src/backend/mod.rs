//! Chat Transport
//!
//! Abstracted access to the remote chat endpoint through a common trait, so
//! the coordinator can be driven by the real HTTP service or by a test double.
//!
//! # Wire Format
//!
//! ```text
//! POST /chat   {"message": "..."}
//!        ◄──   {"error": "..."}                       application error
//!        ◄──   {"reply": "...", "thinking": "..."}    reply (+ optional trace)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use thinkchat_core::backend::{ChatRequest, ChatTransport, HttpTransport};
//!
//! let transport = HttpTransport::new("http://localhost:5000/chat", None)?;
//! let response = transport.send(&ChatRequest::new("こんにちは")).await?;
//! ```

mod http;
mod traits;

pub use http::HttpTransport;
pub use traits::{ChatOutcome, ChatRequest, ChatResponse, ChatTransport, TransportError};
