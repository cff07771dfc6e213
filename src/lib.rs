//! termup - declarative terminal session launcher.
//!
//! termup takes an already-parsed session description — windows, tabs, and
//! the shell commands to run in them — and replays it against a real desktop
//! terminal application through that application's automation interface.
//!
//! # Architecture
//!
//! ```text
//! SessionDescription (parsed elsewhere)
//!         │
//!         ▼
//! Registry ── detect() ──► Core (first valid driver)
//!                            │ TerminalAppCore
//!                            ▼
//!                      TerminalBackend
//!                            │ OsaScriptBackend
//!                            ▼
//!                   osascript → Terminal.app
//! ```
//!
//! - [`session`]: the window/tab/command data model
//! - [`core`]: the [`Core`] driver trait, the selection [`Registry`], and
//!   the macOS Terminal.app driver
//! - [`backend`]: the [`TerminalBackend`] automation seam and its
//!   AppleScript implementation
//!
//! # Example
//!
//! ```no_run
//! use termup::{Registry, SessionDescription, TerminalAppCore};
//!
//! let session: SessionDescription = toml::from_str(
//!     r#"
//!     setup = ["echo ready"]
//!
//!     [windows.default.tabs.default]
//!     commands = ["ls"]
//!     "#,
//! ).unwrap();
//!
//! let mut registry = Registry::new();
//! registry.register(Box::new(TerminalAppCore::new(session)));
//!
//! if let Some(core) = registry.detect() {
//!     core.setup().unwrap();
//!     core.process().unwrap();
//! }
//! ```

pub mod backend;
pub mod core;
pub mod session;

pub use crate::backend::{BackendError, OsaScriptBackend, TabRef, TerminalBackend, WindowRef};
pub use crate::core::{Core, CoreError, Registry, TerminalAppCore};
pub use crate::session::{
    SessionDescription, TabOptions, TabSpec, WindowOptions, WindowSpec, DEFAULT_NAME,
};
