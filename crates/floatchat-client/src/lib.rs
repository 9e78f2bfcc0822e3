//! HTTP transport for FloatChat.
//!
//! Wire contract types for the backend `/chat` endpoint and the
//! reqwest-based client that speaks it.

pub mod error;
pub mod transport;
pub mod wire;

pub use error::TransportError;
pub use transport::{ChatTransport, HttpChatClient};
pub use wire::{ChatPayload, ChatRequest};
