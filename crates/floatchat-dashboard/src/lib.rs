//! Dashboard state for FloatChat.
//!
//! Owns the latest-artifact snapshot (chart, generated query, float
//! locations) published by the conversation engine, and the presentation
//! panels that render it for the shell.

pub mod hub;
pub mod panels;

pub use hub::DashboardHub;
pub use panels::{PanelContent, PanelKind, PanelVisibility};
