//! Per-session context threaded through the dispatch loop.
//!
//! Fields that were ambient globals in older engines (view offset, safe-mode
//! state, session end flag) live here explicitly so sessions can run side by
//! side in tests.

use crate::config::DispatchConfig;
use crate::safemode::SafeModeState;
use crate::types::Offset;

/// How a session stopped accepting turns, if it has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionEnd {
    /// Session is live; turns keep flowing.
    #[default]
    None,
    /// The avatar died but the player is spectating the aftermath.
    Watching,
    /// Spectation over; the session is finished.
    Died,
    /// Player saved and quit.
    Saved,
    /// Player abandoned the character.
    Abandoned,
}

/// Mutable per-session state owned by the dispatch loop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub safe_mode: SafeModeState,

    /// Viewport displacement from the avatar's tile.
    pub view_offset: Offset,

    /// Offset the vehicle code wants while driving; `CenterView` snaps back
    /// to it.
    pub drive_view_offset: Offset,

    pub end: SessionEnd,

    /// Count of player actions that changed world state; consumers use it
    /// for autosave cadence and statistics.
    pub world_action_count: u64,
}

impl Session {
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            safe_mode: SafeModeState::new(config.auto_safe_mode),
            view_offset: Offset::ZERO,
            drive_view_offset: Offset::ZERO,
            end: SessionEnd::None,
            world_action_count: 0,
        }
    }

    /// True while the session accepts ordinary turns.
    pub fn is_live(&self) -> bool {
        self.end == SessionEnd::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_live_with_safe_mode_on() {
        let session = Session::new(&DispatchConfig::default());
        assert!(session.is_live());
        assert!(!session.safe_mode.is_stopped());
        assert_eq!(session.view_offset, Offset::ZERO);
    }

    #[test]
    fn ended_sessions_are_not_live() {
        let mut session = Session::new(&DispatchConfig::default());
        session.end = SessionEnd::Watching;
        assert!(!session.is_live());
    }
}
