//! Settle windows.
//!
//! After every interaction the harness pauses for a fixed window so the
//! screen can finish its own asynchronous rendering before the next read or
//! mutation. This is a deliberate fixed delay, not an event-driven wait, and
//! there is no retry once the window elapses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default settle after a field-level interaction (500ms)
pub const DEFAULT_FIELD_SETTLE_MS: u64 = 500;

/// Default settle after a full-page navigation (1 second)
pub const DEFAULT_NAVIGATION_SETTLE_MS: u64 = 1_000;

// =============================================================================
// SETTLE KIND
// =============================================================================

/// Which settle window applies to an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleKind {
    /// Click, type, clear, check, select or read of a single control
    Field,
    /// Loading an entry screen
    Navigation,
}

impl std::fmt::Display for SettleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Navigation => f.write_str("navigation"),
        }
    }
}

// =============================================================================
// SETTLE CONFIG
// =============================================================================

/// Tunable settle windows, threaded through every controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleConfig {
    /// Window after field-level interactions, in milliseconds
    pub field_ms: u64,
    /// Window after navigation, in milliseconds
    pub navigation_ms: u64,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            field_ms: DEFAULT_FIELD_SETTLE_MS,
            navigation_ms: DEFAULT_NAVIGATION_SETTLE_MS,
        }
    }
}

impl SettleConfig {
    /// Create settle config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-length windows, for in-memory drivers that render synchronously
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            field_ms: 0,
            navigation_ms: 0,
        }
    }

    /// Set the field window in milliseconds
    #[must_use]
    pub const fn with_field_ms(mut self, ms: u64) -> Self {
        self.field_ms = ms;
        self
    }

    /// Set the navigation window in milliseconds
    #[must_use]
    pub const fn with_navigation_ms(mut self, ms: u64) -> Self {
        self.navigation_ms = ms;
        self
    }

    /// Field window as Duration
    #[must_use]
    pub const fn field(&self) -> Duration {
        Duration::from_millis(self.field_ms)
    }

    /// Navigation window as Duration
    #[must_use]
    pub const fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    /// Window for a settle kind
    #[must_use]
    pub const fn window(&self, kind: SettleKind) -> Duration {
        match kind {
            SettleKind::Field => self.field(),
            SettleKind::Navigation => self.navigation(),
        }
    }
}
