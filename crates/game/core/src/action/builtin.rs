//! Handlers the dispatcher owns outright.
//!
//! These cover the actions whose entire behavior is session/avatar
//! bookkeeping: viewport control, turn passing, the safe-mode family, and
//! the session-ending prompts. Anything that touches the world proper lives
//! in the external handler library.

use std::sync::Arc;

use crate::action::kind::ActionKind;
use crate::action::table::{ActionTable, HandlerKey, HandlerReport, Invocation};
use crate::action::ActionHandler;
use crate::dispatch::TurnCtx;
use crate::message::MessageSink;
use crate::session::SessionEnd;
use crate::world::PromptSource;

/// Register every built-in handler into `table`.
pub(crate) fn register(table: &mut ActionTable) {
    let shift = Arc::new(ShiftView);
    for kind in [
        ActionKind::ShiftViewNorth,
        ActionKind::ShiftViewNortheast,
        ActionKind::ShiftViewEast,
        ActionKind::ShiftViewSoutheast,
        ActionKind::ShiftViewSouth,
        ActionKind::ShiftViewSouthwest,
        ActionKind::ShiftViewWest,
        ActionKind::ShiftViewNorthwest,
    ] {
        table.register_builtin(HandlerKey::Act(kind), shift.clone());
    }
    table.register_builtin(HandlerKey::Act(ActionKind::CenterView), Arc::new(CenterView));

    let rest = Arc::new(PassTurn);
    table.register_builtin(HandlerKey::Act(ActionKind::Pause), rest.clone());
    table.register_builtin(HandlerKey::Act(ActionKind::Timeout), rest);

    table.register_builtin(HandlerKey::Act(ActionKind::ToggleRun), Arc::new(ToggleRun));
    table.register_builtin(
        HandlerKey::Act(ActionKind::ToggleSafeMode),
        Arc::new(ToggleSafeMode),
    );
    table.register_builtin(
        HandlerKey::Act(ActionKind::ToggleAutoSafe),
        Arc::new(ToggleAutoSafe),
    );
    table.register_builtin(
        HandlerKey::Act(ActionKind::IgnoreEnemy),
        Arc::new(IgnoreEnemy),
    );
    table.register_builtin(
        HandlerKey::Act(ActionKind::WhitelistEnemy),
        Arc::new(WhitelistEnemy),
    );
    table.register_builtin(HandlerKey::Act(ActionKind::Quit), Arc::new(Abandon));
    table.register_builtin(
        HandlerKey::Act(ActionKind::SaveAndQuit),
        Arc::new(SaveAndQuit),
    );
}

/// Nudge the viewport one step; free, repeatable, allowed while dead.
struct ShiftView;

impl ActionHandler for ShiftView {
    fn invoke(&self, invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        let Some(direction) = invocation.kind.view_shift_direction() else {
            return HandlerReport::no_op();
        };
        let (dx, dy) = direction.delta();
        let step = ctx.config.view_shift_step;
        ctx.session.view_offset = ctx.session.view_offset.shifted(dx * step, dy * step);
        HandlerReport::taken()
    }
}

/// Snap the viewport back to wherever the vehicle code wants it.
struct CenterView;

impl ActionHandler for CenterView {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        ctx.session.view_offset = ctx.session.drive_view_offset;
        HandlerReport::taken()
    }
}

/// Spend the turn standing still, unless safe mode is blocking.
///
/// Explicit pauses warn verbosely; input timeouts block quietly after the
/// first warning so an idle player is not spammed.
struct PassTurn;

impl ActionHandler for PassTurn {
    fn invoke(&self, invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        let verbose = invocation.kind == ActionKind::Pause;
        if !ctx
            .session
            .safe_mode
            .check_continuation(verbose, ctx.messages)
        {
            return HandlerReport::no_op();
        }
        ctx.avatar.rest();
        HandlerReport::taken()
    }
}

/// Walk/run stance flip; costs nothing.
struct ToggleRun;

impl ActionHandler for ToggleRun {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        ctx.avatar.movement_mode = ctx.avatar.movement_mode.toggled();
        match ctx.avatar.movement_mode {
            crate::avatar::MovementMode::Run => ctx.messages.neutral("You start running.".to_string()),
            crate::avatar::MovementMode::Walk => ctx.messages.neutral("You slow to a walk.".to_string()),
        }
        HandlerReport::taken()
    }
}

struct ToggleSafeMode;

impl ActionHandler for ToggleSafeMode {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        ctx.session.safe_mode.toggle(ctx.messages);
        if ctx.avatar.target_locked {
            ctx.avatar.target_locked = false;
            ctx.session.safe_mode.reset_warning();
        }
        HandlerReport::taken()
    }
}

struct ToggleAutoSafe;

impl ActionHandler for ToggleAutoSafe {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        ctx.session.safe_mode.toggle_auto(ctx.messages);
        HandlerReport::taken()
    }
}

/// Wave off the threats that tripped safe mode, or shrug off a target lock.
struct IgnoreEnemy;

impl ActionHandler for IgnoreEnemy {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        if ctx.session.safe_mode.is_stopped() {
            ctx.session.safe_mode.ignore_spotted(ctx.world, ctx.messages);
            ctx.avatar.target_locked = false;
            return HandlerReport::taken();
        }
        if ctx.avatar.target_locked {
            ctx.avatar.target_locked = false;
            ctx.session.safe_mode.reset_warning();
            ctx.messages
                .info("Ignoring the targeting lock!".to_string());
            return HandlerReport::taken();
        }
        HandlerReport::no_op()
    }
}

/// Persist a rule for the threat that tripped safe mode.
struct WhitelistEnemy;

impl ActionHandler for WhitelistEnemy {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        if ctx
            .session
            .safe_mode
            .whitelist_current(ctx.rules, ctx.messages)
        {
            HandlerReport::taken()
        } else {
            HandlerReport::no_op()
        }
    }
}

/// Abandon the character after a double confirmation.
struct Abandon;

impl ActionHandler for Abandon {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        let capital = ctx.config.capital_confirmations;
        if !ctx.prompts.confirm("Abandon this character?", capital) {
            return HandlerReport::no_op();
        }
        if !ctx
            .prompts
            .confirm("REALLY abandon this character?", capital)
        {
            return HandlerReport::no_op();
        }
        ctx.avatar.rest();
        ctx.session.end = SessionEnd::Abandoned;
        HandlerReport::taken()
    }
}

/// Save the session and stop taking turns.
struct SaveAndQuit;

impl ActionHandler for SaveAndQuit {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        if !ctx
            .prompts
            .confirm("Save and quit?", ctx.config.capital_confirmations)
        {
            return HandlerReport::no_op();
        }
        ctx.avatar.rest();
        ctx.session.end = SessionEnd::Saved;
        HandlerReport::taken()
    }
}
