pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::FloatChatConfig;
pub use error::{FloatChatError, Result};
pub use types::*;
