//! Event handling for NDL Lite.
//!
//! Terminal input is read by the [`EventHandler`] and turned into store
//! actions using the configured key bindings.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
