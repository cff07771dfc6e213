//! macOS Terminal.app backend over `osascript`.
//!
//! Terminal.app exposes an AppleScript dictionary; this backend drives it by
//! spawning `/usr/bin/osascript -e <script>` and parsing the textual result.
//!
//! One quirk worth knowing: the dictionary has no constructor for tabs (and
//! `make new window` behaves unreliably across OS versions), so new windows
//! and tabs are requested by sending Cmd-N / Cmd-T keystrokes to the Terminal
//! process through System Events. The newly created tab is then picked up by
//! querying the frontmost window's last tab.
//!
//! Script generation is pure string building and is tested on any OS; only
//! [`OsaScriptBackend::run`] actually needs a Mac.

use std::process::Command;

use tracing::{debug, trace};

use super::{BackendError, Result, TabRef, TerminalBackend, WindowRef};
use crate::session::{TabOptions, WindowOptions};

const OSASCRIPT: &str = "/usr/bin/osascript";

/// Terminal.app automation via AppleScript.
#[derive(Default)]
pub struct OsaScriptBackend;

impl OsaScriptBackend {
    pub fn new() -> Self {
        Self
    }

    /// Run one AppleScript snippet and return its trimmed stdout.
    fn run(&self, script: &str) -> Result<String> {
        trace!(script, "running osascript");
        let output = Command::new(OSASCRIPT)
            .arg("-e")
            .arg(script)
            .output()
            .map_err(BackendError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(BackendError::Automation(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Send a Cmd-<key> keystroke to the Terminal process.
    fn keystroke(&self, key: char) -> Result<()> {
        debug!(%key, "sending command keystroke to Terminal");
        self.run(&keystroke_script(key)).map(|_| ())
    }
}

impl TerminalBackend for OsaScriptBackend {
    fn request_window(&mut self) -> Result<()> {
        self.keystroke('n')
    }

    fn request_tab(&mut self) -> Result<()> {
        self.keystroke('t')
    }

    fn windows(&mut self) -> Result<Vec<WindowRef>> {
        let out = self.run(WINDOW_IDS_SCRIPT)?;
        parse_id_list(&out).map(|ids| ids.into_iter().map(WindowRef::new).collect())
    }

    fn frontmost(&mut self, window: &WindowRef) -> Result<bool> {
        let out = self.run(&frontmost_script(window.id))?;
        match out.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(BackendError::BadOutput(other.to_string())),
        }
    }

    fn last_tab(&mut self, window: &WindowRef) -> Result<TabRef> {
        let out = self.run(&tab_count_script(window.id))?;
        let count: i64 = out
            .parse()
            .map_err(|_| BackendError::BadOutput(out.clone()))?;
        Ok(TabRef::new(window.id, count))
    }

    fn apply_window_options(
        &mut self,
        window: &WindowRef,
        options: &WindowOptions,
    ) -> Result<()> {
        for script in window_options_scripts(window.id, options) {
            self.run(&script)?;
        }
        Ok(())
    }

    fn apply_tab_options(&mut self, tab: &TabRef, options: &TabOptions) -> Result<()> {
        for script in tab_options_scripts(tab, options) {
            self.run(&script)?;
        }
        Ok(())
    }

    fn run_script(&mut self, command: &str, tab: &TabRef) -> Result<()> {
        debug!(command, window = tab.window, tab = tab.index, "do script");
        self.run(&do_script(command, tab)).map(|_| ())
    }
}

const WINDOW_IDS_SCRIPT: &str = r#"tell application "Terminal" to get id of every window"#;

/// Escape a string for use inside an AppleScript string literal.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

fn keystroke_script(key: char) -> String {
    format!(
        r#"tell application "System Events" to tell process "Terminal" to keystroke "{key}" using command down"#
    )
}

fn frontmost_script(window_id: i64) -> String {
    format!(r#"tell application "Terminal" to get frontmost of window id {window_id}"#)
}

fn tab_count_script(window_id: i64) -> String {
    format!(r#"tell application "Terminal" to get count of tabs of window id {window_id}"#)
}

fn do_script(command: &str, tab: &TabRef) -> String {
    format!(
        r#"tell application "Terminal" to do script "{}" in tab {} of window id {}"#,
        escape(command),
        tab.index,
        tab.window
    )
}

fn window_options_scripts(window_id: i64, options: &WindowOptions) -> Vec<String> {
    let mut scripts = Vec::new();
    if let Some([x1, y1, x2, y2]) = options.bounds {
        scripts.push(format!(
            r#"tell application "Terminal" to set bounds of window id {window_id} to {{{x1}, {y1}, {x2}, {y2}}}"#
        ));
    }
    if let Some(visible) = options.visible {
        scripts.push(format!(
            r#"tell application "Terminal" to set visible of window id {window_id} to {visible}"#
        ));
    }
    if let Some(miniaturized) = options.miniaturized {
        scripts.push(format!(
            r#"tell application "Terminal" to set miniaturized of window id {window_id} to {miniaturized}"#
        ));
    }
    scripts
}

fn tab_options_scripts(tab: &TabRef, options: &TabOptions) -> Vec<String> {
    let mut scripts = Vec::new();
    if let Some(settings) = &options.settings {
        scripts.push(format!(
            r#"tell application "Terminal" to set current settings of tab {} of window id {} to settings set "{}""#,
            tab.index,
            tab.window,
            escape(settings)
        ));
    }
    if let Some(selected) = options.selected {
        scripts.push(format!(
            r#"tell application "Terminal" to set selected of tab {} of window id {} to {}"#,
            tab.index, tab.window, selected
        ));
    }
    scripts
}

/// Parse osascript's comma-separated id list (e.g. `"581, 590"`).
fn parse_id_list(out: &str) -> Result<Vec<i64>> {
    if out.is_empty() {
        return Ok(Vec::new());
    }
    out.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| BackendError::BadOutput(out.to_string()))
        })
        .collect()
}
