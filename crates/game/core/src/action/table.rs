//! Lookup-table dispatch: one handler per table key.
//!
//! The table replaces the traditional giant switch over action identifiers.
//! Context rewriting happens before lookup (see [`crate::context`]), so the
//! three movement surfaces register independently and the on-foot handler can
//! never be reached from a vehicle seat.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::ActionKind;
use crate::avatar::Avatar;
use crate::context::ActingContext;
use crate::dispatch::TurnCtx;
use crate::session::Session;
use crate::types::Position;

/// Key under which a handler is registered.
///
/// Directional movement splits by control surface; everything else is keyed
/// by its action kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKey {
    /// On-foot directional step.
    WalkMove,
    /// Steering input for a vehicle under direct control.
    VehicleMove,
    /// Steering input relayed through a remote-control device.
    RemoteMove,
    /// Smash rewritten at the vehicle controls.
    Handbrake,
    /// Any other action, keyed by its kind.
    Act(ActionKind),
}

/// Everything a handler learns about the action it executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub kind: ActionKind,
    pub context: ActingContext,
    /// World tile a mouse click resolved against, when the action came from
    /// the mouse.
    pub mouse_target: Option<Position>,
}

/// How a handler's attempt concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The action ran; state may have changed and cost may have been spent.
    Taken,
    /// A precondition failed before any mutation. Still bookkept as an
    /// attempted action, unlike an unresolved input.
    NoOp,
    /// A movement step was attempted and physically blocked.
    Blocked,
}

/// Handler return value: outcome plus any movement trajectory it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerReport {
    pub outcome: HandlerOutcome,
    pub trajectory: Vec<Position>,
}

impl HandlerReport {
    pub fn taken() -> Self {
        Self {
            outcome: HandlerOutcome::Taken,
            trajectory: Vec::new(),
        }
    }

    pub fn no_op() -> Self {
        Self {
            outcome: HandlerOutcome::NoOp,
            trajectory: Vec::new(),
        }
    }

    pub fn blocked() -> Self {
        Self {
            outcome: HandlerOutcome::Blocked,
            trajectory: Vec::new(),
        }
    }

    pub fn taken_along(trajectory: Vec<Position>) -> Self {
        Self {
            outcome: HandlerOutcome::Taken,
            trajectory,
        }
    }
}

/// One action implementation behind the table.
///
/// Handlers communicate outcome exclusively through [`HandlerReport`];
/// nothing error-shaped crosses back into the dispatch loop. A handler may
/// run nested sub-resolutions through [`TurnCtx::run_nested`] for composite
/// commands.
pub trait ActionHandler: Send + Sync {
    /// Cheap applicability predicate checked before `invoke`. A false return
    /// is bookkept as a NoOp attempt.
    fn applicable(&self, _invocation: &Invocation, _avatar: &Avatar, _session: &Session) -> bool {
        true
    }

    fn invoke(&self, invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport;
}

/// Registration-time misuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("a handler is already registered for {0:?}")]
    Duplicate(HandlerKey),
}

/// Static mapping from table key to handler.
///
/// Built once at session start: the core registers its built-ins, the
/// external handler library fills in the rest through the same seam.
#[derive(Clone, Default)]
pub struct ActionTable {
    entries: HashMap<HandlerKey, Arc<dyn ActionHandler>>,
}

impl ActionTable {
    /// Empty table; nothing registered, every lookup degrades to a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table pre-populated with the dispatcher-owned built-ins (viewport
    /// shifts, turn passing, safe-mode family, session prompts).
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        crate::action::builtin::register(&mut table);
        table
    }

    /// Bind a handler to a key. Double registration is an error so load
    /// order can never silently shadow an action.
    pub fn register(
        &mut self,
        key: HandlerKey,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), TableError> {
        if self.entries.contains_key(&key) {
            return Err(TableError::Duplicate(key));
        }
        self.entries.insert(key, handler);
        Ok(())
    }

    /// Convenience for the common `Act` keys.
    pub fn register_action(
        &mut self,
        kind: ActionKind,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<(), TableError> {
        self.register(HandlerKey::Act(kind), handler)
    }

    pub fn get(&self, key: HandlerKey) -> Option<Arc<dyn ActionHandler>> {
        self.entries.get(&key).cloned()
    }

    pub fn is_registered(&self, key: HandlerKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Used only by the built-in registration pass, which by construction
    /// never collides.
    pub(crate) fn register_builtin(&mut self, key: HandlerKey, handler: Arc<dyn ActionHandler>) {
        self.entries.insert(key, handler);
    }
}

impl std::fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&HandlerKey> = self.entries.keys().collect();
        keys.sort_by_key(|k| format!("{k:?}"));
        f.debug_struct("ActionTable").field("keys", &keys).finish()
    }
}
