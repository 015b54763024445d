//! Logger dependencies handed to the viewer at construction.
//!
//! Errors and deprecation notices travel on separate channels so a host can
//! silence one without losing the other.

use std::{fmt, rc::Rc};

/// Sink for log lines produced by the core.
pub trait Logger {
    fn log(&self, message: &str);
}

impl<F> Logger for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Default error channel, forwards to `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::error!(target: "wavemark", "{message}");
    }
}

/// Default deprecation channel, forwards to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeprecationLogger;

impl Logger for DeprecationLogger {
    fn log(&self, message: &str) {
        tracing::warn!(target: "wavemark::deprecation", "{message}");
    }
}

/// The pair of logger channels shared by the viewer's components.
#[derive(Clone)]
pub struct Loggers {
    pub error: Rc<dyn Logger>,
    pub deprecation: Rc<dyn Logger>,
}

impl Default for Loggers {
    fn default() -> Self {
        Self {
            error: Rc::new(TracingLogger),
            deprecation: Rc::new(DeprecationLogger),
        }
    }
}

impl fmt::Debug for Loggers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loggers").finish()
    }
}
