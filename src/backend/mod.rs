//! Terminal automation backends.
//!
//! A [`TerminalBackend`] is the seam between the window/tab driving logic
//! and one concrete terminal application's automation interface:
//!
//! - **osascript**: macOS Terminal.app via AppleScript (`/usr/bin/osascript`)
//!
//! The trait deals only in primitives the automation layer offers — request a
//! window/tab, enumerate windows, query frontmost, run a script in a tab.
//! Which window to reuse, what order tabs execute in, and how command lists
//! are assembled all live above this seam, so the driver logic stays
//! platform-independent and testable with a fake backend.

pub mod osascript;

pub use osascript::OsaScriptBackend;

use thiserror::Error;

use crate::session::{TabOptions, WindowOptions};

/// Errors from the automation layer.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to launch automation helper: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("automation call failed: {0}")]
    Automation(String),

    #[error("unexpected automation output: {0:?}")]
    BadOutput(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Opaque reference to a live window owned by the terminal application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRef {
    pub(crate) id: i64,
}

impl WindowRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Opaque reference to a live tab within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRef {
    pub(crate) window: i64,
    pub(crate) index: i64,
}

impl TabRef {
    pub fn new(window: i64, index: i64) -> Self {
        Self { window, index }
    }
}

/// Automation primitives of one terminal application.
///
/// All calls are synchronous: they return once the automation layer has
/// acknowledged the request, not once any shell command has finished.
pub trait TerminalBackend {
    /// Ask the application for a new window.
    fn request_window(&mut self) -> Result<()>;

    /// Ask the application for a new tab in the frontmost window.
    fn request_tab(&mut self) -> Result<()>;

    /// All currently open windows, in the application's order.
    fn windows(&mut self) -> Result<Vec<WindowRef>>;

    /// Whether the given window is the frontmost one.
    ///
    /// May fail when the window lacks the property; callers are expected to
    /// treat a failure as "not frontmost".
    fn frontmost(&mut self, window: &WindowRef) -> Result<bool>;

    /// The most recently created tab of the given window.
    fn last_tab(&mut self, window: &WindowRef) -> Result<TabRef>;

    /// Apply display options to a window.
    fn apply_window_options(&mut self, window: &WindowRef, options: &WindowOptions)
        -> Result<()>;

    /// Apply display options to a tab.
    fn apply_tab_options(&mut self, tab: &TabRef, options: &TabOptions) -> Result<()>;

    /// Run a shell command string in the given tab.
    fn run_script(&mut self, command: &str, tab: &TabRef) -> Result<()>;
}
