//! Shared fixtures for the dispatch integration suites.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use holdout_core::{
    ActionHandler, ActionKind, ActionTable, Avatar, Bindings, DispatchConfig, DispatchEnv,
    Dispatcher, EntityId, GameMode, HandlerKey, HandlerReport, InputEvent, InputSource, Invocation,
    MessageLog, MessageSink, Position, PromptSource, SafeModeRules, Session, ThreatId, TurnCtx,
    VehicleId, World,
};

/// Flat grid with an optional blocked-tile set and an optional vehicle under
/// the avatar's control. Routes are straight lines, x first then y, which is
/// all the adjacency-based resolver needs.
#[derive(Default)]
pub struct GridWorld {
    pub blocked: HashSet<Position>,
    pub hidden: HashSet<Position>,
    pub vehicle: Option<VehicleId>,
    pub ignored_threats: Vec<ThreatId>,
    pub started_activities: Vec<holdout_core::ActivityId>,
}

impl World for GridWorld {
    fn sees(&self, _from: Position, target: Position) -> bool {
        !self.hidden.contains(&target)
    }

    fn plan_route(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if self.blocked.contains(&to) {
            return None;
        }
        let mut route = Vec::new();
        let mut cursor = from;
        while cursor.x != to.x {
            cursor.x += (to.x - cursor.x).signum();
            route.push(cursor);
        }
        while cursor.y != to.y {
            cursor.y += (to.y - cursor.y).signum();
            route.push(cursor);
        }
        Some(route)
    }

    fn controlled_vehicle(&self, _avatar: &Avatar) -> Option<VehicleId> {
        self.vehicle
    }

    fn start_activity(&mut self, _avatar: &mut Avatar, activity: holdout_core::ActivityId) {
        self.started_activities.push(activity);
    }

    fn ignore_threat(&mut self, threat: ThreatId) {
        self.ignored_threats.push(threat);
    }
}

/// Keystroke labels are snake_case action names; unknown labels stay unbound.
pub struct NameBindings;

impl Bindings for NameBindings {
    fn resolve(&self, keystroke: &str) -> Option<ActionKind> {
        keystroke.parse().ok()
    }
}

/// Replays a fixed queue of events, then reports exhaustion.
pub struct ScriptInput {
    pub events: Vec<InputEvent>,
}

impl ScriptInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn empty() -> Self {
        Self { events: Vec::new() }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptInput {
    fn next_event(&mut self) -> Option<InputEvent> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events.remove(0))
        }
    }
}

/// Answers every confirmation the same way.
pub struct FixedPrompts(pub bool);

impl PromptSource for FixedPrompts {
    fn confirm(&mut self, _prompt: &str, _force_capital: bool) -> bool {
        self.0
    }

    fn choose(&mut self, _prompt: &str, _options: &[&str]) -> Option<usize> {
        if self.0 { Some(0) } else { None }
    }
}

/// Rule store backed by a plain vector.
#[derive(Default)]
pub struct RecordingRules {
    pub whitelisted: Vec<ThreatId>,
}

impl SafeModeRules for RecordingRules {
    fn matches(&self, threat: ThreatId) -> bool {
        self.whitelisted.contains(&threat)
    }

    fn add_whitelist(&mut self, threat: ThreatId) {
        self.whitelisted.push(threat);
    }
}

/// Counts invocations and charges a fixed cost; the workhorse mock handler.
pub struct CountingHandler {
    pub calls: Arc<AtomicUsize>,
    pub cost: i32,
}

impl CountingHandler {
    pub fn new(calls: &Arc<AtomicUsize>, cost: i32) -> Arc<Self> {
        Arc::new(Self {
            calls: calls.clone(),
            cost,
        })
    }
}

impl ActionHandler for CountingHandler {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.avatar.moves -= self.cost;
        HandlerReport::taken()
    }
}

/// On-foot step handler with a blocked-tile list; reports `Blocked` so the
/// loop can cancel auto-move.
pub struct WalkHandler {
    pub calls: Arc<AtomicUsize>,
    pub blocked: HashSet<Position>,
    pub visited: Arc<Mutex<Vec<Position>>>,
}

impl WalkHandler {
    pub fn open(calls: &Arc<AtomicUsize>) -> Arc<Self> {
        Self::with_blocked(calls, HashSet::new())
    }

    pub fn with_blocked(calls: &Arc<AtomicUsize>, blocked: HashSet<Position>) -> Arc<Self> {
        Arc::new(Self {
            calls: calls.clone(),
            blocked,
            visited: Arc::new(Mutex::new(Vec::new())),
        })
    }
}

impl ActionHandler for WalkHandler {
    fn invoke(&self, invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(direction) = invocation.kind.movement_direction() else {
            return HandlerReport::no_op();
        };
        let (dx, dy) = direction.delta();
        let target = ctx.avatar.position.translated(dx, dy);
        if self.blocked.contains(&target) {
            ctx.messages.bad("You bump into something solid.".to_string());
            return HandlerReport::blocked();
        }
        ctx.avatar.position = target;
        ctx.avatar.moves -= 10;
        self.visited
            .lock()
            .expect("visited poisoned")
            .push(target);
        HandlerReport::taken_along(vec![target])
    }
}

/// Handler that kills the avatar mid-call.
pub struct LethalHandler;

impl ActionHandler for LethalHandler {
    fn invoke(&self, _invocation: &Invocation, ctx: &mut TurnCtx<'_>) -> HandlerReport {
        ctx.avatar.incapacitated = true;
        ctx.avatar.moves = 0;
        HandlerReport::taken()
    }
}

/// Everything one dispatch scenario needs, wired together.
pub struct Fixture {
    pub dispatcher: Dispatcher,
    pub avatar: Avatar,
    pub session: Session,
    pub world: GridWorld,
    pub prompts: FixedPrompts,
    pub rules: RecordingRules,
    pub log: MessageLog,
    pub config: DispatchConfig,
}

impl Fixture {
    pub fn new(table: ActionTable) -> Self {
        Self::with_mode(table, GameMode::default())
    }

    pub fn with_mode(table: ActionTable, mode: GameMode) -> Self {
        let config = DispatchConfig::default();
        Self {
            dispatcher: Dispatcher::with_mode(table, mode),
            avatar: Avatar::new(EntityId::PLAYER, Position::ORIGIN),
            session: Session::new(&config),
            world: GridWorld::default(),
            prompts: FixedPrompts(true),
            rules: RecordingRules::default(),
            log: MessageLog::new(),
            config,
        }
    }

    /// One dispatch call fed by `input`.
    pub fn dispatch_with(&mut self, input: &mut ScriptInput) -> bool {
        let mut env = DispatchEnv {
            world: &mut self.world,
            input,
            bindings: &NameBindings,
            prompts: &mut self.prompts,
            rules: &mut self.rules,
            messages: &mut self.log,
            config: &self.config,
        };
        self.dispatcher
            .dispatch(&mut self.avatar, &mut self.session, &mut env)
    }

    /// One dispatch call resolving a single keystroke.
    pub fn press(&mut self, key: &str) -> bool {
        let mut input = ScriptInput::new(vec![InputEvent::Keystroke(key.to_string())]);
        self.dispatch_with(&mut input)
    }

    /// One dispatch call with no pending input at all.
    pub fn idle_dispatch(&mut self) -> bool {
        let mut input = ScriptInput::empty();
        self.dispatch_with(&mut input)
    }

    /// Fresh move budget, as the world-advance step would grant.
    pub fn refill_moves(&mut self) {
        self.avatar.moves = holdout_core::MOVES_PER_TURN;
    }
}

/// Builtins plus an unobstructed walk handler.
pub fn walking_table(calls: &Arc<AtomicUsize>) -> ActionTable {
    let mut table = ActionTable::with_builtins();
    table
        .register(HandlerKey::WalkMove, WalkHandler::open(calls))
        .expect("walk handler registers once");
    table
}
