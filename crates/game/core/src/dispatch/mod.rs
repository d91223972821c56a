//! The per-turn dispatch loop.
//!
//! One call to [`Dispatcher::dispatch`] resolves at most one action, runs at
//! most one handler, and reconciles the turn cost and auto-move/safe-mode
//! side effects before returning whether the avatar can still act. The walk
//! through the phases is a straight line with early exits; [`DispatchPhase`]
//! names where a call ended for diagnostics.

mod automove;
mod input;

pub use automove::AutoMoveState;
pub use input::{Bindings, InputEvent, InputSource, MouseButton, ResolvedInput};

use crate::action::{
    ActionHandler, ActionKind, ActionTable, HandlerOutcome, HandlerReport, Invocation,
};
use crate::avatar::Avatar;
use crate::config::DispatchConfig;
use crate::context;
use crate::message::MessageSink;
use crate::mode::GameMode;
use crate::session::{Session, SessionEnd};
use crate::types::Offset;
use crate::world::{PromptSource, SafeModeRules, World};

/// Phase a dispatch call ended in; purely diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchPhase {
    Idle,
    Resolving,
    Classifying,
    PreHook,
    Dispatching,
    PostHook,
    Done,
}

/// Ephemeral per-call record of what one dispatch call did and what it cost.
///
/// Never gates subsequent calls; the runtime logs it and moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnAccount {
    /// Resolved action, when resolution got that far.
    pub kind: Option<ActionKind>,
    /// Phase the call ended in; `Done` means a handler ran.
    pub ended_at: DispatchPhase,
    pub moves_before: i32,
    pub moves_after: i32,
    /// Move budget the action consumed; zero for every early exit.
    pub elapsed: i32,
}

impl TurnAccount {
    fn skipped(kind: Option<ActionKind>, ended_at: DispatchPhase, moves: i32) -> Self {
        Self {
            kind,
            ended_at,
            moves_before: moves,
            moves_after: moves,
            elapsed: 0,
        }
    }

    fn settled(kind: ActionKind, moves_before: i32, moves_after: i32, incapacitated: bool) -> Self {
        Self {
            kind: Some(kind),
            ended_at: DispatchPhase::Done,
            moves_before,
            moves_after,
            // A corpse spends nothing, whatever the handler says.
            elapsed: if incapacitated {
                0
            } else {
                moves_before - moves_after
            },
        }
    }
}

/// External collaborators threaded through one dispatch call.
///
/// Everything here is borrowed for the duration of the call only; the
/// dispatcher never stores a collaborator.
pub struct DispatchEnv<'a> {
    pub world: &'a mut dyn World,
    pub input: &'a mut dyn InputSource,
    pub bindings: &'a dyn Bindings,
    pub prompts: &'a mut dyn PromptSource,
    pub rules: &'a mut dyn SafeModeRules,
    pub messages: &'a mut dyn MessageSink,
    pub config: &'a DispatchConfig,
}

/// Execution context handed to handlers.
///
/// Carries mutable access to the acting entity, the session, and the
/// collaborator seams, plus the table itself for nested sub-resolution.
pub struct TurnCtx<'a> {
    pub avatar: &'a mut Avatar,
    pub session: &'a mut Session,
    pub world: &'a mut dyn World,
    pub messages: &'a mut dyn MessageSink,
    pub prompts: &'a mut dyn PromptSource,
    pub rules: &'a mut dyn SafeModeRules,
    pub config: &'a DispatchConfig,
    table: &'a ActionTable,
}

impl<'a> TurnCtx<'a> {
    /// Synchronously run another action through the table, for composite
    /// commands (draw-then-fire and friends).
    ///
    /// This is a nested call, not re-entrant dispatch: no input is read, the
    /// same turn pays for everything, and refusals apply as usual.
    pub fn run_nested(&mut self, kind: ActionKind) -> HandlerReport {
        let kontext = context::classify(self.avatar, &*self.world, kind);
        if let Some(text) = context::refusal_for(kind, self.avatar, &kontext) {
            self.messages.info(text);
            return HandlerReport::no_op();
        }
        let key = context::handler_key(kind, &kontext);
        let Some(handler) = self.table.get(key) else {
            return HandlerReport::no_op();
        };
        let invocation = Invocation {
            kind,
            context: kontext,
            mouse_target: None,
        };
        if !handler.applicable(&invocation, self.avatar, self.session) {
            return HandlerReport::no_op();
        }
        handler.invoke(&invocation, self)
    }

    /// Run a modal interaction and restore the viewport afterwards, on every
    /// exit path including cancellation.
    pub fn with_viewport_restored<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        let saved: Offset = self.session.view_offset;
        let result = body(self);
        self.session.view_offset = saved;
        result
    }
}

/// The dispatch state machine.
///
/// Owns the action table and the play-mode hook; everything mutable per
/// session or per entity is passed in on each call.
pub struct Dispatcher {
    table: ActionTable,
    mode: GameMode,
    last_account: Option<TurnAccount>,
}

impl Dispatcher {
    pub fn new(table: ActionTable) -> Self {
        Self::with_mode(table, GameMode::default())
    }

    pub fn with_mode(table: ActionTable, mode: GameMode) -> Self {
        Self {
            table,
            mode,
            last_account: None,
        }
    }

    pub fn table(&self) -> &ActionTable {
        &self.table
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    /// Account of the most recent dispatch call.
    pub fn last_account(&self) -> Option<&TurnAccount> {
        self.last_account.as_ref()
    }

    /// Execute at most one action for `avatar` and return whether it can
    /// still initiate turns. `false` tells the caller to stop dispatching
    /// for this entity.
    pub fn dispatch(
        &mut self,
        avatar: &mut Avatar,
        session: &mut Session,
        env: &mut DispatchEnv<'_>,
    ) -> bool {
        self.last_account = None;

        // Resolving
        let Some(resolved) = input::resolve(avatar, session, env) else {
            self.last_account = Some(TurnAccount::skipped(
                None,
                DispatchPhase::Resolving,
                avatar.moves,
            ));
            return Self::liveness(avatar, session);
        };
        let kind = resolved.kind;

        // A spectator pressing quit is done watching.
        if session.end == SessionEnd::Watching && kind == ActionKind::Quit {
            session.end = SessionEnd::Died;
            self.last_account = Some(TurnAccount::skipped(
                Some(kind),
                DispatchPhase::Resolving,
                avatar.moves,
            ));
            return false;
        }

        // Classifying
        let kontext = context::classify(avatar, &*env.world, kind);

        if avatar.is_incapacitated() && !kind.allowed_while_incapacitated() {
            self.last_account = Some(TurnAccount::skipped(
                Some(kind),
                DispatchPhase::Classifying,
                avatar.moves,
            ));
            return Self::liveness(avatar, session);
        }

        if let Some(text) = context::refusal_for(kind, avatar, &kontext) {
            env.messages.info(text);
            self.last_account = Some(TurnAccount::skipped(
                Some(kind),
                DispatchPhase::Classifying,
                avatar.moves,
            ));
            return Self::liveness(avatar, session);
        }

        // PreHook
        if !self.mode.pre_action(kind, env.messages) {
            self.last_account = Some(TurnAccount::skipped(
                Some(kind),
                DispatchPhase::PreHook,
                avatar.moves,
            ));
            return Self::liveness(avatar, session);
        }

        // Dispatching
        let key = context::handler_key(kind, &kontext);
        let Some(handler) = self.table.get(key) else {
            // Unmapped actions degrade to a safe no-op instead of aborting.
            env.messages
                .bad(format!("You have no way to do that right now ({kind})."));
            self.last_account = Some(TurnAccount::skipped(
                Some(kind),
                DispatchPhase::Dispatching,
                avatar.moves,
            ));
            return Self::liveness(avatar, session);
        };

        let invocation = Invocation {
            kind,
            context: kontext,
            mouse_target: resolved.mouse_target,
        };
        let moves_before = avatar.moves;

        let report = if handler.applicable(&invocation, avatar, session) {
            let mut ctx = TurnCtx {
                avatar: &mut *avatar,
                session: &mut *session,
                world: &mut *env.world,
                messages: &mut *env.messages,
                prompts: &mut *env.prompts,
                rules: &mut *env.rules,
                config: env.config,
                table: &self.table,
            };
            handler.invoke(&invocation, &mut ctx)
        } else {
            HandlerReport::no_op()
        };

        // A blocked step means the queued path is stale; drop it before it
        // can retry into the same obstacle.
        if kind.is_movement() && report.outcome == HandlerOutcome::Blocked {
            avatar.auto_move.clear();
        }

        // PostHook
        self.mode.post_action(kind, env.messages);
        if kind.changes_world_state() && report.outcome == HandlerOutcome::Taken {
            session.world_action_count += 1;
        }

        // Done
        self.last_account = Some(TurnAccount::settled(
            kind,
            moves_before,
            avatar.moves,
            avatar.is_incapacitated(),
        ));
        Self::liveness(avatar, session)
    }

    fn liveness(avatar: &Avatar, session: &Session) -> bool {
        !avatar.is_incapacitated() && session.is_live()
    }
}
