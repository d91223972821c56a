//! Read-only configuration consulted by the dispatch loop.

/// Settings the dispatcher reads but never writes.
///
/// The runtime loads these from its configuration file; tests construct them
/// directly. Session-mutable switches (auto-safe-mode re-enable) are seeded
/// from here into [`crate::session::Session`] at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Re-enable safe mode automatically after the area stays quiet.
    pub auto_safe_mode: bool,

    /// Require capitalized answers for destructive confirmation prompts.
    pub capital_confirmations: bool,

    /// Tiles the viewport moves per view-shift action.
    pub view_shift_step: i32,

    /// Suppress the "Unknown command" diagnostic for unbound keys.
    pub suppress_unknown_commands: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            auto_safe_mode: false,
            capital_confirmations: true,
            view_shift_step: 1,
            suppress_unknown_commands: false,
        }
    }
}
