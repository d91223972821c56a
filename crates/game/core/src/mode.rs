//! Play-mode capability layered over the dispatch loop.
//!
//! Alternate play modes veto actions before dispatch and observe them after.
//! Modeled as an enum rather than an inheritance hierarchy: adding a mode
//! means adding a variant, and the loop calls the same two hooks either way.

use crate::action::ActionKind;
use crate::message::MessageSink;

/// Number of world-changing actions between siege lull warnings.
const SIEGE_WAVE_INTERVAL: u32 = 25;

/// Active play mode for the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// Ordinary survival play; hooks are inert.
    Standard,

    /// Guided introduction; long-form commitments are held back until the
    /// basics are done.
    Tutorial,

    /// Wave-defense scenario; tracks how close the next assault is.
    Siege { lull_remaining: u32 },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Standard
    }
}

impl GameMode {
    pub fn siege() -> Self {
        GameMode::Siege {
            lull_remaining: SIEGE_WAVE_INTERVAL,
        }
    }

    /// Pre-dispatch veto. Returning false records the action as not taken;
    /// no handler runs and no cost is charged.
    pub fn pre_action(&mut self, kind: ActionKind, messages: &mut dyn MessageSink) -> bool {
        match self {
            GameMode::Standard | GameMode::Siege { .. } => true,
            GameMode::Tutorial => match kind {
                ActionKind::Sleep | ActionKind::SaveAndQuit => {
                    messages.info("That isn't available during the tutorial.".to_string());
                    false
                }
                _ => true,
            },
        }
    }

    /// Post-dispatch observer; sees every completed action.
    pub fn post_action(&mut self, kind: ActionKind, messages: &mut dyn MessageSink) {
        if let GameMode::Siege { lull_remaining } = self {
            if kind.changes_world_state() {
                *lull_remaining = lull_remaining.saturating_sub(1);
                if *lull_remaining == 0 {
                    messages.bad("You hear the horde stirring.".to_string());
                    *lull_remaining = SIEGE_WAVE_INTERVAL;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageLog;

    #[test]
    fn standard_mode_vetoes_nothing() {
        let mut mode = GameMode::Standard;
        let mut log = MessageLog::new();
        assert!(mode.pre_action(ActionKind::Sleep, &mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn tutorial_holds_back_long_commitments() {
        let mut mode = GameMode::Tutorial;
        let mut log = MessageLog::new();
        assert!(!mode.pre_action(ActionKind::Sleep, &mut log));
        assert!(!mode.pre_action(ActionKind::SaveAndQuit, &mut log));
        assert!(mode.pre_action(ActionKind::MoveNorth, &mut log));
        assert!(log.contains("tutorial"));
    }

    #[test]
    fn siege_counts_down_world_changing_actions() {
        let mut mode = GameMode::Siege { lull_remaining: 2 };
        let mut log = MessageLog::new();

        mode.post_action(ActionKind::Look, &mut log); // passive, no tick
        mode.post_action(ActionKind::MoveNorth, &mut log);
        assert!(log.is_empty());

        mode.post_action(ActionKind::MoveNorth, &mut log);
        assert!(log.contains("horde"));
        assert_eq!(
            mode,
            GameMode::Siege {
                lull_remaining: SIEGE_WAVE_INTERVAL
            }
        );
    }
}
