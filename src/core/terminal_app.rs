//! The macOS Terminal.app core.
//!
//! Walks a [`SessionDescription`] and replays it against a
//! [`TerminalBackend`]: the `default` window reuses the terminal window that
//! is already open, every other window is created fresh, and tabs within a
//! window execute in ascending name order. The core is generic over the
//! backend, so all of the ordering and selection logic runs against a
//! recording fake in tests; production code uses [`OsaScriptBackend`].

use std::env;

use tracing::{debug, info};

use super::{Core, CoreError, Result};
use crate::backend::{OsaScriptBackend, TabRef, TerminalBackend, WindowRef};
use crate::session::{SessionDescription, TabOptions, WindowOptions, WindowSpec, DEFAULT_NAME};

/// Per-window execution context.
#[derive(Debug, Clone, Default)]
pub struct WindowContext {
    /// Whether this is the already-open default window
    pub default: bool,
    /// Optional title set on the window's shell prompt
    pub title: Option<String>,
}

/// Core that drives macOS Terminal.app.
pub struct TerminalAppCore<B: TerminalBackend = OsaScriptBackend> {
    session: SessionDescription,
    backend: B,
}

impl TerminalAppCore<OsaScriptBackend> {
    /// Create a core for the given session, talking to Terminal.app.
    pub fn new(session: SessionDescription) -> Self {
        Self::with_backend(session, OsaScriptBackend::new())
    }
}

impl<B: TerminalBackend> TerminalAppCore<B> {
    /// Create a core over an arbitrary backend.
    pub fn with_backend(session: SessionDescription, backend: B) -> Self {
        Self { session, backend }
    }

    /// Execute one window: create its context, then run every tab's commands
    /// in ascending tab-name order.
    ///
    /// The first tab of a non-default window opens the new window itself
    /// (applying the window's display options and that tab's options); after
    /// that, a tab named `default` reuses the currently active tab and any
    /// other name opens a new tab.
    pub fn execute_window(&mut self, spec: &WindowSpec, ctx: &WindowContext) -> Result<()> {
        let mut first_run = true;

        for (tab_name, tab) in &spec.tabs {
            let target = if first_run && !ctx.default {
                self.open_window(&spec.options, &tab.options)?
            } else if tab_name == DEFAULT_NAME {
                self.active_tab()?
            } else {
                self.open_tab(&tab.options)?
            };
            first_run = false;

            let commands = prepend_befores(&tab.commands, &spec.befores);
            let commands = set_title(ctx.title.as_deref(), commands);
            debug!(tab = %tab_name, count = commands.len(), "running tab commands");
            for command in &commands {
                self.execute_command(command, &target)?;
            }
        }

        Ok(())
    }

    /// Submit one command string to the given tab.
    pub fn execute_command(&mut self, command: &str, tab: &TabRef) -> Result<()> {
        self.backend.run_script(command, tab)?;
        Ok(())
    }

    /// Open a new window, apply its display options and the first tab's
    /// options, and return a reference to the tab it starts with.
    pub fn open_window(
        &mut self,
        window_options: &WindowOptions,
        tab_options: &TabOptions,
    ) -> Result<TabRef> {
        self.backend.request_window()?;
        let window = self.active_window()?;
        if !window_options.is_empty() {
            self.backend.apply_window_options(&window, window_options)?;
        }
        let tab = self.backend.last_tab(&window)?;
        if !tab_options.is_empty() {
            self.backend.apply_tab_options(&tab, tab_options)?;
        }
        Ok(tab)
    }

    /// Open a new tab in the active window, apply its options, and return
    /// a reference to it.
    pub fn open_tab(&mut self, tab_options: &TabOptions) -> Result<TabRef> {
        self.backend.request_tab()?;
        let tab = self.active_tab()?;
        if !tab_options.is_empty() {
            self.backend.apply_tab_options(&tab, tab_options)?;
        }
        Ok(tab)
    }

    /// The frontmost window.
    ///
    /// A window whose frontmost query fails counts as not frontmost; that is
    /// the one automation failure this core swallows.
    pub fn active_window(&mut self) -> Result<WindowRef> {
        for window in self.backend.windows()? {
            if self.backend.frontmost(&window).unwrap_or(false) {
                return Ok(window);
            }
        }
        Err(CoreError::NoActiveWindow)
    }

    /// The most recently created tab of the frontmost window.
    pub fn active_tab(&mut self) -> Result<TabRef> {
        let window = self.active_window()?;
        Ok(self.backend.last_tab(&window)?)
    }
}

impl<B: TerminalBackend> Core for TerminalAppCore<B> {
    fn valid(&self) -> bool {
        cfg!(target_os = "macos")
            && env::var("TERM_PROGRAM")
                .map(|term| term == "Apple_Terminal")
                .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "Terminal.app (macOS)"
    }

    fn setup(&mut self) -> Result<()> {
        let commands = self.session.setup.clone();
        if commands.is_empty() {
            return Ok(());
        }

        info!(count = commands.len(), "running setup commands");
        let tab = self.active_tab()?;
        for command in &commands {
            self.execute_command(command, &tab)?;
        }
        Ok(())
    }

    fn process(&mut self) -> Result<()> {
        let mut windows = std::mem::take(&mut self.session.windows);

        // The default window, when present with tabs, always goes first and
        // reuses the already-open window.
        if let Some(default) = windows.shift_remove(DEFAULT_NAME) {
            if !default.tabs.is_empty() {
                debug!("executing default window");
                self.execute_window(
                    &default,
                    &WindowContext {
                        default: true,
                        title: None,
                    },
                )?;
            }
        }

        for (name, spec) in &windows {
            debug!(window = %name, "executing window");
            self.execute_window(spec, &WindowContext::default())?;
        }

        Ok(())
    }
}

/// Prepend a window's before-commands to a tab's command list.
///
/// Returns a fresh list; neither input is modified. With no befores the
/// commands come back as-is.
pub fn prepend_befores(commands: &[String], befores: &[String]) -> Vec<String> {
    if befores.is_empty() {
        return commands.to_vec();
    }
    let mut result = Vec::with_capacity(befores.len() + commands.len());
    result.extend_from_slice(befores);
    result.extend_from_slice(commands);
    result
}

/// Prepend a command that writes `title` into the terminal's title bar via
/// the shell prompt. Without a title the commands come back unchanged.
pub fn set_title(title: Option<&str>, commands: Vec<String>) -> Vec<String> {
    match title {
        Some(title) => {
            let mut result = Vec::with_capacity(commands.len() + 1);
            result.push(format!("PS1=\"$PS1\\[\\e]2;{title}\\a\\]\""));
            result.extend(commands);
            result
        }
        None => commands,
    }
}
