//! Seams to the collaborators the dispatcher deliberately excludes.
//!
//! World simulation, pathfinding, vehicle mechanics, and threat bookkeeping
//! all live behind these traits. The dispatch core asks narrow questions
//! (visibility, routes, control seats) and issues narrow commands (start an
//! activity, mark a threat ignored); everything else is somebody else's job.

use std::fmt;

use crate::avatar::Avatar;
use crate::types::Position;

/// Handle to a vehicle tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

/// Handle to a remote-control device bound to a controllable vehicle or drone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(pub u32);

/// Handle to a hostile creature reported by the perception collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreatId(pub u32);

/// Handle to a long-running activity scheduled at a travel destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityId(pub u32);

impl fmt::Display for ThreatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "threat #{}", self.0)
    }
}

/// World queries and commands the dispatch loop needs each call.
pub trait World {
    /// Can the avatar currently see `target`? Mouse clicks resolve only
    /// against visible tiles.
    fn sees(&self, from: Position, target: Position) -> bool;

    /// Plan a walkable route from `from` to `to`, inclusive of `to` and
    /// exclusive of `from`. Pathfinding itself is external; `None` means no
    /// route exists.
    fn plan_route(&self, from: Position, to: Position) -> Option<Vec<Position>>;

    /// The vehicle whose controls the avatar currently operates, either from
    /// its controlling seat or through an established remote-drive link.
    fn controlled_vehicle(&self, avatar: &Avatar) -> Option<VehicleId>;

    /// Begin the scheduled activity now that the avatar has reached its
    /// travel destination.
    fn start_activity(&mut self, avatar: &mut Avatar, activity: ActivityId);

    /// Mark a spotted hostile as ignored so it no longer triggers safe mode.
    fn ignore_threat(&mut self, threat: ThreatId);
}

/// Blocking modal prompts some handlers raise mid-turn.
///
/// Prompts suspend the dispatch call on the same thread; implementations must
/// eventually return, and callers restore viewport state on every exit path.
pub trait PromptSource {
    /// Yes/no confirmation. `force_capital` asks the UI to require the
    /// capitalized answer key for destructive choices.
    fn confirm(&mut self, prompt: &str, force_capital: bool) -> bool;

    /// Pick one option from a menu; `None` means the player cancelled.
    fn choose(&mut self, prompt: &str, options: &[&str]) -> Option<usize>;
}

/// Persistent safe-mode rule store (external collaborator).
pub trait SafeModeRules {
    /// Does an existing rule already cover this threat?
    fn matches(&self, threat: ThreatId) -> bool;

    /// Persist a whitelist rule for this threat.
    fn add_whitelist(&mut self, threat: ThreatId);
}
