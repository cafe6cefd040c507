//! Match logger with optional in-memory capture
//!
//! Each controller owns its logger; there is no global logging state, so
//! matches running in parallel never interleave their output.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// How much a match reports while it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - only the match outcome
    Minimal = 1,
    /// Normal - turns, phases and applied actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every event and every rejected action
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "0" | "silent" => Ok(VerbosityLevel::Silent),
            "1" | "minimal" => Ok(VerbosityLevel::Minimal),
            "2" | "normal" => Ok(VerbosityLevel::Normal),
            "3" | "verbose" => Ok(VerbosityLevel::Verbose),
            other => Err(format!("unknown verbosity '{other}'")),
        }
    }
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "event", "rejected", "result")
    pub category: Option<String>,
}

/// Read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Per-match logger
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    /// Print the state hash after every applied action
    debug_state_hash: bool,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            debug_state_hash: false,
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Logger that captures everything to memory and prints nothing
    pub fn capturing(verbosity: VerbosityLevel) -> Self {
        let mut logger = Self::with_verbosity(verbosity);
        logger.set_output_mode(OutputMode::Memory);
        logger
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_debug_state_hash(&mut self, enabled: bool) {
        self.debug_state_hash = enabled;
    }

    pub fn debug_state_hash_enabled(&self) -> bool {
        self.debug_state_hash
    }

    /// Captured entries at or below the current verbosity
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{message}");
        } else {
            println!("  {message}");
        }
    }

    /// Core logging entry point
    pub fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level == VerbosityLevel::Silent || level > self.verbosity {
            return;
        }

        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(str::to_string),
            });
        }

        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            Self::log_to_stdout(level, message);
        }
    }

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Whether a message at `level` would be emitted at all
    #[inline]
    pub fn enabled(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && level <= self.verbosity
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

/// Clones share settings but start with an empty buffer
impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            debug_state_hash: self.debug_state_hash,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

/// Log a formatted message at Verbose level, compiled out without the
/// `verbose-logging` feature.
#[macro_export]
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            if $logger.enabled($crate::game::VerbosityLevel::Verbose) {
                $logger.verbose(&format!($($arg)*));
            }
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(logger.output_mode(), OutputMode::Stdout);
    }

    #[test]
    fn test_log_capture_respects_verbosity() {
        let logger = GameLogger::capturing(VerbosityLevel::Normal);

        logger.normal("turn 1");
        logger.minimal("A wins");
        logger.verbose("hidden");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "turn 1");
        assert_eq!(logs[1].level, VerbosityLevel::Minimal);
    }

    #[test]
    fn test_categories() {
        let logger = GameLogger::capturing(VerbosityLevel::Verbose);
        logger.log(VerbosityLevel::Verbose, Some("rejected"), "Field is full");

        let logs = logger.logs();
        assert_eq!(logs[0].category.as_deref(), Some("rejected"));
    }

    #[test]
    fn test_silent_logs_nothing() {
        let logger = GameLogger::capturing(VerbosityLevel::Silent);
        logger.minimal("A wins");
        assert!(logger.logs().is_empty());
        assert!(!logger.enabled(VerbosityLevel::Minimal));
    }

    #[test]
    fn test_clone_starts_empty() {
        let logger = GameLogger::capturing(VerbosityLevel::Verbose);
        logger.normal("message");
        let cloned = logger.clone();
        assert!(cloned.logs().is_empty());
        assert!(cloned.is_capturing());
    }

    #[test]
    fn test_verbosity_from_str() {
        assert_eq!("verbose".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Verbose));
        assert_eq!("1".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Minimal));
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }
}
