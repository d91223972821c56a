//! Acting-context classification and the restriction overlay.
//!
//! Exactly one context governs each dispatch call. The context is recomputed
//! from avatar and world state every time, never cached, because vehicle
//! boarding, remote links, and death all change between turns.

use crate::action::{ActionKind, HandlerKey};
use crate::avatar::{Avatar, Restrictions};
use crate::world::{DeviceId, VehicleId, World};

/// Which control surface governs this turn's action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActingContext {
    /// Ordinary on-foot play.
    OnFoot,
    /// The avatar operates a vehicle from its controlling seat (or drives
    /// one remotely).
    VehicleOperator(VehicleId),
    /// A bound remote-control device captures directional input.
    RemoteOperator(DeviceId),
}

impl ActingContext {
    #[inline]
    pub fn is_vehicle(&self) -> bool {
        matches!(self, ActingContext::VehicleOperator(_))
    }
}

/// Compute the acting context for one action.
///
/// Remote operation takes precedence over vehicle operation only for
/// directional movement; for everything else a held remote does not change
/// how the action resolves. Incapacitation overrides both.
pub fn classify(avatar: &Avatar, world: &dyn World, kind: ActionKind) -> ActingContext {
    if avatar.is_incapacitated() {
        return ActingContext::OnFoot;
    }
    if kind.movement_direction().is_some()
        && let Some(device) = avatar.remote_binding
    {
        return ActingContext::RemoteOperator(device);
    }
    if let Some(vehicle) = world.controlled_vehicle(avatar) {
        return ActingContext::VehicleOperator(vehicle);
    }
    ActingContext::OnFoot
}

/// Map an action to the table key it dispatches under.
///
/// This is the context-rewrite step: directional movement splits across the
/// three control surfaces, and a smash at the controls becomes the
/// handbrake. Everything else dispatches under its own kind.
pub fn handler_key(kind: ActionKind, context: &ActingContext) -> HandlerKey {
    if kind.movement_direction().is_some() {
        return match context {
            ActingContext::RemoteOperator(_) => HandlerKey::RemoteMove,
            ActingContext::VehicleOperator(_) => HandlerKey::VehicleMove,
            ActingContext::OnFoot => HandlerKey::WalkMove,
        };
    }
    if kind == ActionKind::Smash && context.is_vehicle() {
        return HandlerKey::Handbrake;
    }
    HandlerKey::Act(kind)
}

/// Refusal check for the restriction overlay and context-sensitive rules.
///
/// A refused action is never dispatched: the text is emitted as an info
/// message, no handler runs, no cost is charged, nothing mutates.
pub fn refusal_for(kind: ActionKind, avatar: &Avatar, context: &ActingContext) -> Option<String> {
    if avatar.restrictions.contains(Restrictions::CONFINED)
        && let Some(activity) = confined_activity(kind)
    {
        return Some(format!("You can't {activity} while confined."));
    }
    match kind {
        ActionKind::Sleep if context.is_vehicle() => {
            Some("You can't sleep while the vehicle controls are engaged.".to_string())
        }
        ActionKind::Disassemble if context.is_vehicle() => {
            Some("You can't disassemble items while driving.".to_string())
        }
        ActionKind::Construct if avatar.in_vehicle => {
            Some("You can't construct while in a vehicle.".to_string())
        }
        _ => None,
    }
}

/// The fixed subset of actions the confined overlay disables, phrased for
/// the refusal message.
fn confined_activity(kind: ActionKind) -> Option<&'static str> {
    use ActionKind::*;
    match kind {
        Open => Some("open things"),
        Close => Some("close things"),
        Smash => Some("smash things"),
        Examine => Some("examine your surroundings"),
        Grab => Some("grab things"),
        Butcher => Some("butcher"),
        Peek => Some("peek around corners"),
        DropAdjacent => Some("drop things onto another tile"),
        Craft | Recraft | LongCraft => Some("craft"),
        Construct => Some("construct"),
        ControlVehicle => Some("operate a vehicle"),
        _ => None,
    }
}

/// Every action the confined overlay refuses, for gating tests and UI hints.
pub fn confined_disabled_set() -> Vec<ActionKind> {
    use ActionKind::*;
    [
        Open,
        Close,
        Smash,
        Examine,
        Grab,
        Butcher,
        Peek,
        DropAdjacent,
        Craft,
        Recraft,
        LongCraft,
        Construct,
        ControlVehicle,
    ]
    .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, Position};
    use crate::world::{ActivityId, ThreatId};

    struct TestWorld {
        controlled: Option<VehicleId>,
    }

    impl World for TestWorld {
        fn sees(&self, _from: Position, _target: Position) -> bool {
            true
        }
        fn plan_route(&self, _from: Position, _to: Position) -> Option<Vec<Position>> {
            None
        }
        fn controlled_vehicle(&self, _avatar: &Avatar) -> Option<VehicleId> {
            self.controlled
        }
        fn start_activity(&mut self, _avatar: &mut Avatar, _activity: ActivityId) {}
        fn ignore_threat(&mut self, _threat: ThreatId) {}
    }

    fn avatar() -> Avatar {
        Avatar::new(EntityId::PLAYER, Position::ORIGIN)
    }

    #[test]
    fn remote_binding_captures_only_directional_movement() {
        let mut avatar = avatar();
        avatar.remote_binding = Some(DeviceId(1));
        let world = TestWorld {
            controlled: Some(VehicleId(2)),
        };

        assert_eq!(
            classify(&avatar, &world, ActionKind::MoveNorth),
            ActingContext::RemoteOperator(DeviceId(1))
        );
        // Non-directional actions fall through to the vehicle context.
        assert_eq!(
            classify(&avatar, &world, ActionKind::Examine),
            ActingContext::VehicleOperator(VehicleId(2))
        );
    }

    #[test]
    fn incapacitation_overrides_every_context() {
        let mut avatar = avatar();
        avatar.incapacitated = true;
        avatar.remote_binding = Some(DeviceId(1));
        let world = TestWorld {
            controlled: Some(VehicleId(2)),
        };

        assert_eq!(
            classify(&avatar, &world, ActionKind::MoveNorth),
            ActingContext::OnFoot
        );
    }

    #[test]
    fn movement_rewrites_per_control_surface() {
        let kind = ActionKind::MoveEast;
        assert_eq!(
            handler_key(kind, &ActingContext::OnFoot),
            HandlerKey::WalkMove
        );
        assert_eq!(
            handler_key(kind, &ActingContext::VehicleOperator(VehicleId(1))),
            HandlerKey::VehicleMove
        );
        assert_eq!(
            handler_key(kind, &ActingContext::RemoteOperator(DeviceId(1))),
            HandlerKey::RemoteMove
        );
    }

    #[test]
    fn smash_at_the_controls_is_the_handbrake() {
        assert_eq!(
            handler_key(
                ActionKind::Smash,
                &ActingContext::VehicleOperator(VehicleId(1))
            ),
            HandlerKey::Handbrake
        );
        assert_eq!(
            handler_key(ActionKind::Smash, &ActingContext::OnFoot),
            HandlerKey::Act(ActionKind::Smash)
        );
    }

    #[test]
    fn confined_overlay_refuses_its_whole_set() {
        let mut avatar = avatar();
        avatar.restrictions = Restrictions::CONFINED;

        for kind in confined_disabled_set() {
            assert!(
                refusal_for(kind, &avatar, &ActingContext::OnFoot).is_some(),
                "{kind} should be refused while confined"
            );
        }
        // Inventory access is fine while confined.
        assert!(refusal_for(ActionKind::Eat, &avatar, &ActingContext::OnFoot).is_none());
        assert!(refusal_for(ActionKind::Drop, &avatar, &ActingContext::OnFoot).is_none());
    }

    #[test]
    fn vehicle_context_refusals() {
        let avatar = avatar();
        let vehicle = ActingContext::VehicleOperator(VehicleId(1));
        assert!(refusal_for(ActionKind::Sleep, &avatar, &vehicle).is_some());
        assert!(refusal_for(ActionKind::Disassemble, &avatar, &vehicle).is_some());
        assert!(refusal_for(ActionKind::Sleep, &avatar, &ActingContext::OnFoot).is_none());

        let mut passenger = self::avatar();
        passenger.in_vehicle = true;
        assert!(refusal_for(ActionKind::Construct, &passenger, &ActingContext::OnFoot).is_some());
    }
}
