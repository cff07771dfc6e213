//! Cores - pluggable session-launching drivers.
//!
//! A core maps a [`SessionDescription`](crate::session::SessionDescription)
//! onto one terminal application's automation interface. Cores share a small
//! capability surface:
//!
//! - **valid**: is this core usable on the current platform/environment?
//! - **name**: human-readable, for selection menus
//! - **setup**: run the session's one-time setup commands
//! - **process**: lay out every window and tab and run their commands
//!
//! A [`Registry`] holds the candidate cores in registration order; the first
//! one whose `valid()` returns true drives the session.

pub mod terminal_app;

pub use terminal_app::{prepend_befores, set_title, TerminalAppCore, WindowContext};

use thiserror::Error;
use tracing::debug;

use crate::backend::BackendError;

/// Errors from driving a session.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("no active terminal window found")]
    NoActiveWindow,
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Capability surface shared by all session-launching drivers.
pub trait Core {
    /// Whether this core can drive the current platform/environment.
    fn valid(&self) -> bool;

    /// Human-readable name used in core selection menus.
    fn name(&self) -> &'static str;

    /// Run the session's setup commands in the active window.
    fn setup(&mut self) -> Result<()>;

    /// Lay out every window and tab and run their commands.
    fn process(&mut self) -> Result<()>;
}

/// Ordered collection of candidate cores.
#[derive(Default)]
pub struct Registry {
    cores: Vec<Box<dyn Core>>,
}

impl Registry {
    pub fn new() -> Self {
        Self { cores: Vec::new() }
    }

    /// Add a candidate core. Registration order decides selection priority.
    pub fn register(&mut self, core: Box<dyn Core>) {
        debug!(core = core.name(), "registering core");
        self.cores.push(core);
    }

    /// The first registered core that is valid on this system.
    pub fn detect(&mut self) -> Option<&mut (dyn Core + 'static)> {
        self.cores
            .iter_mut()
            .find(|core| core.valid())
            .map(|core| core.as_mut())
    }

    /// Names of all registered cores, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.cores.iter().map(|core| core.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubCore {
        valid: bool,
        name: &'static str,
    }

    impl Core for StubCore {
        fn valid(&self) -> bool {
            self.valid
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn setup(&mut self) -> Result<()> {
            Ok(())
        }

        fn process(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_detect_picks_first_valid_core() {
        let mut registry = Registry::new();
        registry.register(Box::new(StubCore {
            valid: false,
            name: "first",
        }));
        registry.register(Box::new(StubCore {
            valid: true,
            name: "second",
        }));
        registry.register(Box::new(StubCore {
            valid: true,
            name: "third",
        }));

        let core = registry.detect().unwrap();
        assert_eq!(core.name(), "second");

        // The returned reference is usable as a live driver
        core.setup().unwrap();
        core.process().unwrap();
    }

    #[test]
    fn test_detect_with_no_valid_core() {
        let mut registry = Registry::new();
        registry.register(Box::new(StubCore {
            valid: false,
            name: "only",
        }));

        assert!(registry.detect().is_none());
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(StubCore {
            valid: false,
            name: "b",
        }));
        registry.register(Box::new(StubCore {
            valid: false,
            name: "a",
        }));

        assert_eq!(registry.names(), vec!["b", "a"]);
    }
}
