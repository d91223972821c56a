//! The action vocabulary: every semantic intent the avatar can express.
//!
//! `ActionKind` is deliberately flat and data-free. Direction, class, and
//! gating information are derived through methods so the dispatch loop can
//! rewrite and gate actions without inspecting handler internals.

use bitflags::bitflags;

/// Eight-way compass direction for movement and viewport shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
    ];

    /// Tile delta for one step in this direction. North is negative `y`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::Northeast => (1, -1),
            Direction::East => (1, 0),
            Direction::Southeast => (1, 1),
            Direction::South => (0, 1),
            Direction::Southwest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::Northwest => (-1, -1),
        }
    }

    /// Direction from `from` to an adjacent tile `to`, or `None` when the
    /// tiles are not neighbours.
    pub fn between(from: crate::types::Position, to: crate::types::Position) -> Option<Direction> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        if !from.is_adjacent(to) {
            return None;
        }
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

bitflags! {
    /// Broad behavioural classes used for gating and bookkeeping.
    ///
    /// Classes are not exclusive; an action carries every class that applies.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ActionClass: u16 {
        /// Moves the avatar (or its vehicle) through the world.
        const MOVEMENT     = 1 << 0;
        /// Pure viewport/spectation commands; never touch world state.
        const VIEW         = 1 << 1;
        /// Hands-on interaction with adjacent terrain and objects.
        const MANIPULATION = 1 << 2;
        /// Inventory and equipment management.
        const INVENTORY    = 1 << 3;
        /// Ranged weapon operation.
        const RANGED       = 1 << 4;
        /// Multi-turn undertakings (crafting, building, sleeping).
        const LONG_TASK    = 1 << 5;
        /// Vehicle operation.
        const VEHICLE      = 1 << 6;
        /// Safe-mode and threat-response commands.
        const SAFETY       = 1 << 7;
        /// Turn passing (pause, wait, input timeout).
        const REST         = 1 << 8;
        /// Session lifecycle (quit, save-and-quit).
        const SESSION      = 1 << 9;
    }
}

/// One discrete semantic command the avatar can execute in a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------
    MoveNorth,
    MoveNortheast,
    MoveEast,
    MoveSoutheast,
    MoveSouth,
    MoveSouthwest,
    MoveWest,
    MoveNorthwest,
    MoveUp,
    MoveDown,

    // ------------------------------------------------------------------
    // Turn passing
    // ------------------------------------------------------------------
    Pause,
    /// Input delay elapsed with nothing pressed; behaves like a quiet pause.
    Timeout,
    Wait,

    // ------------------------------------------------------------------
    // Viewport / spectation
    // ------------------------------------------------------------------
    ShiftViewNorth,
    ShiftViewNortheast,
    ShiftViewEast,
    ShiftViewSoutheast,
    ShiftViewSouth,
    ShiftViewSouthwest,
    ShiftViewWest,
    ShiftViewNorthwest,
    CenterView,
    Look,
    Peek,

    // ------------------------------------------------------------------
    // Manipulation
    // ------------------------------------------------------------------
    Open,
    Close,
    Smash,
    Examine,
    Pickup,
    Grab,
    Butcher,
    Chat,

    // ------------------------------------------------------------------
    // Inventory / equipment
    // ------------------------------------------------------------------
    Inventory,
    Use,
    UseWielded,
    Wear,
    TakeOff,
    Eat,
    Read,
    Wield,
    Drop,
    DropAdjacent,
    Unload,
    Reload,

    // ------------------------------------------------------------------
    // Ranged
    // ------------------------------------------------------------------
    Fire,
    FireBurst,
    CycleFireMode,
    Throw,

    // ------------------------------------------------------------------
    // Long-form tasks
    // ------------------------------------------------------------------
    Craft,
    Recraft,
    LongCraft,
    Disassemble,
    Construct,
    Sleep,

    // ------------------------------------------------------------------
    // Vehicle
    // ------------------------------------------------------------------
    ControlVehicle,

    // ------------------------------------------------------------------
    // Mobility mode
    // ------------------------------------------------------------------
    ToggleRun,

    // ------------------------------------------------------------------
    // Safety
    // ------------------------------------------------------------------
    ToggleSafeMode,
    ToggleAutoSafe,
    IgnoreEnemy,
    WhitelistEnemy,

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------
    Quit,
    SaveAndQuit,
}

impl ActionKind {
    /// Direction of a horizontal movement action, `None` for everything else
    /// (including vertical movement and viewport shifts).
    pub fn movement_direction(self) -> Option<Direction> {
        match self {
            ActionKind::MoveNorth => Some(Direction::North),
            ActionKind::MoveNortheast => Some(Direction::Northeast),
            ActionKind::MoveEast => Some(Direction::East),
            ActionKind::MoveSoutheast => Some(Direction::Southeast),
            ActionKind::MoveSouth => Some(Direction::South),
            ActionKind::MoveSouthwest => Some(Direction::Southwest),
            ActionKind::MoveWest => Some(Direction::West),
            ActionKind::MoveNorthwest => Some(Direction::Northwest),
            _ => None,
        }
    }

    /// Movement action for a compass direction.
    pub fn from_movement_direction(direction: Direction) -> ActionKind {
        match direction {
            Direction::North => ActionKind::MoveNorth,
            Direction::Northeast => ActionKind::MoveNortheast,
            Direction::East => ActionKind::MoveEast,
            Direction::Southeast => ActionKind::MoveSoutheast,
            Direction::South => ActionKind::MoveSouth,
            Direction::Southwest => ActionKind::MoveSouthwest,
            Direction::West => ActionKind::MoveWest,
            Direction::Northwest => ActionKind::MoveNorthwest,
        }
    }

    /// Direction of a viewport-shift action.
    pub fn view_shift_direction(self) -> Option<Direction> {
        match self {
            ActionKind::ShiftViewNorth => Some(Direction::North),
            ActionKind::ShiftViewNortheast => Some(Direction::Northeast),
            ActionKind::ShiftViewEast => Some(Direction::East),
            ActionKind::ShiftViewSoutheast => Some(Direction::Southeast),
            ActionKind::ShiftViewSouth => Some(Direction::South),
            ActionKind::ShiftViewSouthwest => Some(Direction::Southwest),
            ActionKind::ShiftViewWest => Some(Direction::West),
            ActionKind::ShiftViewNorthwest => Some(Direction::Northwest),
            _ => None,
        }
    }

    /// Behavioural classes this action belongs to.
    pub fn class(self) -> ActionClass {
        use ActionKind::*;
        match self {
            MoveNorth | MoveNortheast | MoveEast | MoveSoutheast | MoveSouth | MoveSouthwest
            | MoveWest | MoveNorthwest | MoveUp | MoveDown => ActionClass::MOVEMENT,

            Pause | Timeout | Wait => ActionClass::REST,

            ShiftViewNorth | ShiftViewNortheast | ShiftViewEast | ShiftViewSoutheast
            | ShiftViewSouth | ShiftViewSouthwest | ShiftViewWest | ShiftViewNorthwest
            | CenterView | Look | Peek => ActionClass::VIEW,

            Open | Close | Smash | Examine | Pickup | Grab | Butcher | Chat => {
                ActionClass::MANIPULATION
            }

            Inventory | Use | UseWielded | Wear | TakeOff | Eat | Read | Wield | Drop
            | DropAdjacent | Unload | Reload => ActionClass::INVENTORY,

            Fire | FireBurst | CycleFireMode | Throw => ActionClass::RANGED,

            Craft | Recraft | LongCraft | Disassemble | Construct | Sleep => {
                ActionClass::LONG_TASK
            }

            ControlVehicle => ActionClass::VEHICLE,

            ToggleRun => ActionClass::REST,

            ToggleSafeMode | ToggleAutoSafe | IgnoreEnemy | WhitelistEnemy => ActionClass::SAFETY,

            Quit | SaveAndQuit => ActionClass::SESSION,
        }
    }

    /// True for actions whose handler reports movement step success/failure,
    /// coupling them to auto-move cancellation.
    pub fn is_movement(self) -> bool {
        self.class().contains(ActionClass::MOVEMENT)
    }

    /// Does executing this action plausibly mutate world state? Used for the
    /// per-session action counter, never for gating.
    pub fn changes_world_state(self) -> bool {
        use ActionKind::*;
        match self {
            Timeout | ToggleRun => false,
            _ => self.class().intersects(
                ActionClass::MOVEMENT
                    | ActionClass::MANIPULATION
                    | ActionClass::INVENTORY
                    | ActionClass::RANGED
                    | ActionClass::LONG_TASK
                    | ActionClass::VEHICLE
                    | ActionClass::REST,
            ),
        }
    }

    /// Narrow allow-list that stays available while the avatar is
    /// incapacitated, for post-mortem spectation.
    pub fn allowed_while_incapacitated(self) -> bool {
        self.view_shift_direction().is_some()
            || matches!(self, ActionKind::CenterView | ActionKind::Look)
    }
}
