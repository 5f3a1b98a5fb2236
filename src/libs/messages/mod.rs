//! User-facing messages and the macros that print them.
//!
//! Every piece of text shown to the user is a [`Message`] variant; its wording is
//! defined once in `display.rs`. The `msg_*!` macros in `macros.rs` decide whether
//! it goes to the terminal or to the tracing subscriber.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
