//! Safe-mode escalation guarding automatic turn continuation.
//!
//! Safe mode exists to keep timeouts and auto-move from walking the avatar
//! into a newly spotted hostile. The perception collaborator reports
//! sightings; this module owns the `{Off, On, Stop}` state machine and the
//! one-shot warning bookkeeping. Rule persistence lives behind
//! [`SafeModeRules`].

use crate::message::MessageSink;
use crate::world::{SafeModeRules, ThreatId, World};

/// Safe-mode position. `Stop` pins the threat that triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SafeMode {
    Off,
    On,
    Stop { threat: ThreatId },
}

/// Per-session safe-mode state; persists across dispatch calls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafeModeState {
    mode: SafeMode,
    /// Hostiles spotted since the last acknowledgement, in sighting order.
    spotted: Vec<ThreatId>,
    /// The blocking warning has been shown for the current stop.
    warning_logged: bool,
    /// Session-local auto-re-enable switch, seeded from configuration.
    pub auto_reenable: bool,
}

impl SafeModeState {
    pub fn new(auto_reenable: bool) -> Self {
        Self {
            mode: SafeMode::On,
            spotted: Vec::new(),
            warning_logged: false,
            auto_reenable,
        }
    }

    #[inline]
    pub fn mode(&self) -> SafeMode {
        self.mode
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self.mode, SafeMode::Stop { .. })
    }

    /// Threats spotted since the current stop began.
    pub fn spotted(&self) -> &[ThreatId] {
        &self.spotted
    }

    /// Explicit on/off toggle. Turning safe mode off also clears any stop.
    pub fn toggle(&mut self, messages: &mut dyn MessageSink) {
        match self.mode {
            SafeMode::Off => {
                self.mode = SafeMode::On;
                messages.info("Safe mode ON!".to_string());
            }
            SafeMode::On | SafeMode::Stop { .. } => {
                self.mode = SafeMode::Off;
                self.spotted.clear();
                self.warning_logged = false;
                if self.auto_reenable {
                    messages.info("Safe mode OFF! (Auto safe mode still enabled!)".to_string());
                } else {
                    messages.info("Safe mode OFF!".to_string());
                }
            }
        }
    }

    /// Flip the session-local auto-re-enable switch.
    pub fn toggle_auto(&mut self, messages: &mut dyn MessageSink) {
        self.auto_reenable = !self.auto_reenable;
        if self.auto_reenable {
            messages.info("Auto safe mode ON!".to_string());
        } else {
            messages.info("Auto safe mode OFF!".to_string());
        }
    }

    /// Report a newly visible hostile. Escalates On → Stop unless an existing
    /// rule covers the threat. Returns true when the sighting escalated.
    pub fn observe_hostile(&mut self, threat: ThreatId, rules: &dyn SafeModeRules) -> bool {
        if rules.matches(threat) {
            return false;
        }
        match self.mode {
            SafeMode::Off => false,
            SafeMode::On => {
                self.spotted.push(threat);
                self.mode = SafeMode::Stop { threat };
                true
            }
            SafeMode::Stop { .. } => {
                self.spotted.push(threat);
                true
            }
        }
    }

    /// Gate for automatic continuation (timeouts, auto-move) and explicit
    /// pauses. While stopped, emits the blocking warning once per stop when
    /// `verbose`, or on the first silent block, then returns false.
    pub fn check_continuation(&mut self, verbose: bool, messages: &mut dyn MessageSink) -> bool {
        match self.mode {
            SafeMode::Stop { threat } => {
                if verbose || !self.warning_logged {
                    messages.info(format!(
                        "Safe mode is on! ({threat} spotted. Ignore, whitelist, or toggle safe mode to proceed.)"
                    ));
                    self.warning_logged = true;
                }
                false
            }
            SafeMode::Off | SafeMode::On => true,
        }
    }

    /// Mark every spotted threat ignored and drop back to On.
    pub fn ignore_spotted(&mut self, world: &mut dyn World, messages: &mut dyn MessageSink) {
        messages.info("Ignoring the enemy!".to_string());
        for &threat in &self.spotted {
            world.ignore_threat(threat);
        }
        self.resume();
    }

    /// Persist a whitelist rule for the triggering threat and drop back to
    /// On. Returns false when there is no stop to whitelist.
    pub fn whitelist_current(
        &mut self,
        rules: &mut dyn SafeModeRules,
        messages: &mut dyn MessageSink,
    ) -> bool {
        let SafeMode::Stop { threat } = self.mode else {
            return false;
        };
        rules.add_whitelist(threat);
        messages.info(format!("Creature whitelisted: {threat}"));
        self.resume();
        true
    }

    /// Stop → On; clears sighting and warning bookkeeping.
    fn resume(&mut self) {
        self.mode = SafeMode::On;
        self.spotted.clear();
        self.warning_logged = false;
    }

    /// Reset the one-shot warning so the next block warns again.
    pub fn reset_warning(&mut self) {
        self.warning_logged = false;
    }
}
