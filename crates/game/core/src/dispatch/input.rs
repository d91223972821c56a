//! Input resolution: one normalized event in, at most one action out.
//!
//! Resolution order matters and is fixed: a pending auto-move route wins,
//! then a reached destination activity, and only then does the resolver
//! block for a fresh input event. Unresolvable input is never an error; it
//! yields nothing and the turn is not consumed.

use crate::action::{ActionKind, Direction};
use crate::avatar::Avatar;
use crate::dispatch::DispatchEnv;
use crate::message::MessageSink;
use crate::session::Session;
use crate::types::Position;
use crate::world::World;

/// Mouse button of a click event, already normalized by the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Primary,
    Secondary,
}

/// One normalized input event, tagged by category.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    /// A key chord, identified by the label the input layer assigned it.
    Keystroke(String),
    /// A click on a world tile.
    Mouse {
        button: MouseButton,
        target: Position,
    },
    /// The input delay elapsed with nothing pressed.
    Timeout,
}

/// Blocking source of normalized input events.
///
/// `None` means the source is exhausted (for example the feeding channel
/// closed); the resolver treats it like unresolvable input.
pub trait InputSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

/// Keystroke-label → action mapping. Key-binding configuration is external;
/// only the lookup crosses into this crate.
pub trait Bindings {
    fn resolve(&self, keystroke: &str) -> Option<ActionKind>;
}

/// A successfully resolved action, plus the click target when the action
/// came from the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedInput {
    pub kind: ActionKind,
    pub mouse_target: Option<Position>,
}

impl ResolvedInput {
    fn key(kind: ActionKind) -> Self {
        Self {
            kind,
            mouse_target: None,
        }
    }

    fn at(kind: ActionKind, target: Position) -> Self {
        Self {
            kind,
            mouse_target: Some(target),
        }
    }
}

/// Resolve exactly one action for this dispatch call, or `None` when no
/// turn should be consumed.
pub(crate) fn resolve(
    avatar: &mut Avatar,
    session: &mut Session,
    env: &mut DispatchEnv<'_>,
) -> Option<ResolvedInput> {
    if avatar.auto_move.has_route() {
        // A safe-mode stop cancels the route outright; leaving it queued
        // would keep winning the resolution race over the acknowledgement
        // keystroke.
        if !session.safe_mode.check_continuation(false, env.messages) {
            avatar.auto_move.clear();
            return None;
        }
        return match avatar.auto_move.next_step(avatar.position) {
            Some(direction) => Some(ResolvedInput::key(ActionKind::from_movement_direction(
                direction,
            ))),
            None => {
                env.messages.info("Auto-move canceled.".to_string());
                avatar.auto_move.clear();
                None
            }
        };
    }

    if let Some(activity) = avatar.auto_move.take_destination_activity() {
        env.world.start_activity(avatar, activity);
        return None;
    }

    match env.input.next_event()? {
        InputEvent::Keystroke(label) => match env.bindings.resolve(&label) {
            Some(kind) => {
                // Any deliberate action invalidates queued auto-movement; a
                // bare timeout must not, or double-click travel would require
                // out-racing the input delay.
                if kind != ActionKind::Timeout {
                    avatar.auto_move.clear();
                }
                Some(ResolvedInput::key(kind))
            }
            None => {
                if !env.config.suppress_unknown_commands {
                    env.messages.info(format!("Unknown command: \"{label}\""));
                }
                None
            }
        },
        InputEvent::Mouse { button, target } => resolve_click(avatar, env, button, target),
        InputEvent::Timeout => Some(ResolvedInput::key(ActionKind::Timeout)),
    }
}

/// Resolve a mouse click against the world.
///
/// Clicks only land on visible tiles, never while incapacitated, and never
/// under vehicle control. A primary click on a distant tile queues travel
/// instead of producing an action.
fn resolve_click(
    avatar: &mut Avatar,
    env: &mut DispatchEnv<'_>,
    button: MouseButton,
    target: Position,
) -> Option<ResolvedInput> {
    if avatar.is_incapacitated() {
        return None;
    }
    if env.world.controlled_vehicle(avatar).is_some() {
        return None;
    }
    if !env.world.sees(avatar.position, target) {
        return None;
    }

    match button {
        MouseButton::Secondary => Some(ResolvedInput::at(ActionKind::Examine, target)),
        MouseButton::Primary => {
            if target == avatar.position {
                return Some(ResolvedInput::at(ActionKind::Pickup, target));
            }
            if let Some(direction) = Direction::between(avatar.position, target) {
                return Some(ResolvedInput::key(ActionKind::from_movement_direction(
                    direction,
                )));
            }
            match env.world.plan_route(avatar.position, target) {
                Some(route) => {
                    avatar.auto_move.set_route(route);
                    None
                }
                None => {
                    env.messages.bad("You can't reach that spot.".to_string());
                    None
                }
            }
        }
    }
}
