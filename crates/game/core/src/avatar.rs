//! The dispatcher's view of the acting entity.
//!
//! `Avatar` holds exactly the fields the dispatch loop reads or reconciles:
//! the per-turn move budget, position, incapacitation, the restriction
//! overlay, and the auto-move queue. Health, skills, and everything else the
//! handler library cares about stay outside this crate.

use bitflags::bitflags;

use crate::dispatch::AutoMoveState;
use crate::types::{EntityId, Position};
use crate::world::DeviceId;

/// Move budget granted at the start of each turn.
pub const MOVES_PER_TURN: i32 = 100;

bitflags! {
    /// Restriction overlay independently disabling a fixed action subset.
    ///
    /// Restrictions stack on top of context classification; a restricted
    /// action is refused before its handler is ever looked up.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Restrictions: u8 {
        /// Sealed inside a shelter/shell; hands-on interaction with the
        /// outside world is impossible.
        const CONFINED = 1 << 0;
    }
}

/// Walking or running; toggled at zero cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    #[default]
    Walk,
    Run,
}

impl MovementMode {
    pub fn toggled(self) -> Self {
        match self {
            MovementMode::Walk => MovementMode::Run,
            MovementMode::Run => MovementMode::Walk,
        }
    }
}

/// Acting-entity state the dispatch loop owns or reconciles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Avatar {
    pub id: EntityId,
    pub position: Position,

    /// Remaining move budget this turn; handlers spend it, the loop only
    /// measures the difference.
    pub moves: i32,

    /// Dead or otherwise unable to act. Gates everything except the
    /// spectation allow-list.
    pub incapacitated: bool,

    /// Riding in a vehicle, controlling seat or not.
    pub in_vehicle: bool,

    pub movement_mode: MovementMode,
    pub restrictions: Restrictions,

    /// Active remote-control binding, when the avatar carries a paired
    /// device targeting a controllable vehicle or drone.
    pub remote_binding: Option<DeviceId>,

    /// A hostile has a targeting lock on the avatar; cleared by safe-mode
    /// responses.
    pub target_locked: bool,

    pub auto_move: AutoMoveState,
}

impl Avatar {
    pub fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            position,
            moves: MOVES_PER_TURN,
            incapacitated: false,
            in_vehicle: false,
            movement_mode: MovementMode::default(),
            restrictions: Restrictions::empty(),
            remote_binding: None,
            target_locked: false,
            auto_move: AutoMoveState::default(),
        }
    }

    #[inline]
    pub fn is_incapacitated(&self) -> bool {
        self.incapacitated
    }

    /// Spend the rest of this turn doing nothing.
    pub fn rest(&mut self) {
        self.moves = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_mode_toggles_both_ways() {
        assert_eq!(MovementMode::Walk.toggled(), MovementMode::Run);
        assert_eq!(MovementMode::Run.toggled(), MovementMode::Walk);
    }

    #[test]
    fn rest_drains_the_move_budget() {
        let mut avatar = Avatar::new(EntityId::PLAYER, Position::ORIGIN);
        assert_eq!(avatar.moves, MOVES_PER_TURN);
        avatar.rest();
        assert_eq!(avatar.moves, 0);
    }
}
