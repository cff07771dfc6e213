//! Session description model.
//!
//! This module defines the in-memory shape of a parsed session description
//! ("Termfile"): which windows to lay out, which tabs each window contains,
//! and which shell commands run in each tab. termup does not own any file
//! format — a collaborator parses whatever source it likes and hands over a
//! [`SessionDescription`]. The types derive serde traits so that can be TOML,
//! JSON, or anything else, e.g.:
//!
//! ```toml
//! setup = ["bundle install"]
//!
//! [windows.default.tabs.default]
//! commands = ["ls"]
//!
//! [windows.editor]
//! befores = ["cd ~/code/project"]
//!
//! [windows.editor.options]
//! bounds = [10, 10, 800, 600]
//!
//! [windows.editor.tabs.vim]
//! commands = ["vim ."]
//! ```
//!
//! # Ordering
//!
//! Windows execute in declaration order, so they live in an [`IndexMap`].
//! Tabs within a window execute in ascending lexicographic order of their
//! names — a deliberate policy, encoded here by storing them in a
//! [`BTreeMap`].
//!
//! # The "default" name
//!
//! The window named `default` refers to the terminal window that is already
//! open when processing starts; it is reused rather than created. A tab named
//! `default` likewise reuses the currently active tab.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved name for the already-open window / currently active tab.
pub const DEFAULT_NAME: &str = "default";

/// A parsed session description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDescription {
    /// Commands run once in the active window before any window is processed
    pub setup: Vec<String>,
    /// Windows to lay out, in declaration order
    pub windows: IndexMap<String, WindowSpec>,
}

/// One window of the session: display options, per-window pre-commands,
/// and the tabs it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    /// Display options applied when the window is created
    pub options: WindowOptions,
    /// Commands prepended to every tab's command list in this window
    pub befores: Vec<String>,
    /// Tabs keyed by name; execution order is the key order (lexicographic)
    pub tabs: BTreeMap<String, TabSpec>,
}

/// One tab of a window: the commands it runs and its display options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSpec {
    /// Shell commands run sequentially in this tab
    pub commands: Vec<String>,
    /// Display options applied when the tab is created
    pub options: TabOptions,
}

/// Window display options the automation interface accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window frame as `[x1, y1, x2, y2]` screen coordinates
    pub bounds: Option<[i32; 4]>,
    /// Whether the window is visible
    pub visible: Option<bool>,
    /// Whether the window is minimized to the Dock
    pub miniaturized: Option<bool>,
}

impl WindowOptions {
    /// True when no option is set, so applying them would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none() && self.visible.is_none() && self.miniaturized.is_none()
    }
}

/// Tab display options the automation interface accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabOptions {
    /// Name of the terminal settings profile to apply
    pub settings: Option<String>,
    /// Whether the tab becomes the selected one in its window
    pub selected: Option<bool>,
}

impl TabOptions {
    /// True when no option is set, so applying them would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.settings.is_none() && self.selected.is_none()
    }
}
