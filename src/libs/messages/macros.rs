//! Convenient macros for application messaging and logging.
//!
//! The macros route every message either to `tracing` (debug mode) or straight to
//! the terminal (normal mode), so call sites never have to care which is active.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either of these environment variables is set:
//! - **`ASKAWAY_DEBUG`**: explicit debug mode
//! - **`RUST_LOG`**: standard Rust logging configuration
//!
//! The check runs once and is cached.
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: plain message
//! - **`msg_success!`**: success, with ✅ prefix
//! - **`msg_info!`**: information, with ℹ️ prefix
//! - **`msg_warning!`**: warning, with ⚠️ prefix
//! - **`msg_error!`**: error, with ❌ prefix, to stderr
//! - **`msg_debug!`**: debug mode only, with 🔍 prefix
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an `anyhow::Error`
//!
//! ## Usage Examples
//!
//! ```rust
//! use askaway::{msg_info, msg_error_anyhow};
//! use askaway::libs::messages::Message;
//!
//! msg_info!(Message::WatcherStartingForeground);
//! let error = msg_error_anyhow!(Message::BucketsNotResolved("cannot find the afk bucket".to_string()));
//! assert!(error.to_string().contains("afk bucket"));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("ASKAWAY_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
