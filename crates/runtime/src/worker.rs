//! Session worker: owns one avatar's dispatch loop.
//!
//! The dispatch core is strictly synchronous and blocks for input, so the
//! worker parks it on a blocking task and feeds it through the input
//! channel. Turn accounts and messages fan out on the event bus; the worker
//! returns how the session ended.

use holdout_core::{
    ActionTable, Avatar, Bindings, DispatchConfig, DispatchEnv, DispatchPhase, Dispatcher,
    EntityId, GameMode, Position, PromptSource, SafeModeRules, Session, SessionEnd, World,
};

use crate::error::{Result, RuntimeError};
use crate::events::{BusSink, EventBus, SessionEvent};
use crate::input::ChannelInput;

/// Builder wiring a session's collaborators together.
///
/// The action table, world, bindings, prompts, and safe-mode rules are all
/// mandatory; the build fails loudly rather than dispatching into a void.
pub struct SessionWorkerBuilder {
    config: DispatchConfig,
    mode: GameMode,
    avatar: Avatar,
    table: Option<ActionTable>,
    world: Option<Box<dyn World + Send>>,
    bindings: Option<Box<dyn Bindings + Send>>,
    prompts: Option<Box<dyn PromptSource + Send>>,
    rules: Option<Box<dyn SafeModeRules + Send>>,
    events: EventBus,
}

impl SessionWorkerBuilder {
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            mode: GameMode::default(),
            avatar: Avatar::new(EntityId::PLAYER, Position::ORIGIN),
            table: None,
            world: None,
            bindings: None,
            prompts: None,
            rules: None,
            events: EventBus::default(),
        }
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = avatar;
        self
    }

    pub fn table(mut self, table: ActionTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn world(mut self, world: Box<dyn World + Send>) -> Self {
        self.world = Some(world);
        self
    }

    pub fn bindings(mut self, bindings: Box<dyn Bindings + Send>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn prompts(mut self, prompts: Box<dyn PromptSource + Send>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    pub fn rules(mut self, rules: Box<dyn SafeModeRules + Send>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn build(self, input: ChannelInput) -> Result<SessionWorker> {
        let table = self
            .table
            .ok_or(RuntimeError::MissingCollaborator { missing: "table" })?;
        Ok(SessionWorker {
            dispatcher: Dispatcher::with_mode(table, self.mode),
            avatar: self.avatar,
            session: Session::new(&self.config),
            config: self.config,
            world: self
                .world
                .ok_or(RuntimeError::MissingCollaborator { missing: "world" })?,
            bindings: self
                .bindings
                .ok_or(RuntimeError::MissingCollaborator { missing: "bindings" })?,
            prompts: self
                .prompts
                .ok_or(RuntimeError::MissingCollaborator { missing: "prompts" })?,
            rules: self
                .rules
                .ok_or(RuntimeError::MissingCollaborator { missing: "rules" })?,
            events: self.events,
            input,
        })
    }
}

/// Drives one avatar's dispatch loop to completion.
pub struct SessionWorker {
    dispatcher: Dispatcher,
    avatar: Avatar,
    session: Session,
    config: DispatchConfig,
    world: Box<dyn World + Send>,
    bindings: Box<dyn Bindings + Send>,
    prompts: Box<dyn PromptSource + Send>,
    rules: Box<dyn SafeModeRules + Send>,
    events: EventBus,
    input: ChannelInput,
}

impl SessionWorker {
    pub fn builder(config: DispatchConfig) -> SessionWorkerBuilder {
        SessionWorkerBuilder::new(config)
    }

    /// Run the session on a blocking task until the avatar can no longer
    /// act or the input feed closes.
    pub async fn run(self) -> Result<SessionEnd> {
        tokio::task::spawn_blocking(move || self.run_blocking())
            .await
            .map_err(RuntimeError::WorkerJoin)
    }

    fn run_blocking(mut self) -> SessionEnd {
        loop {
            let mut sink = BusSink::new(&self.events);
            let mut env = DispatchEnv {
                world: &mut *self.world,
                input: &mut self.input,
                bindings: &*self.bindings,
                prompts: &mut *self.prompts,
                rules: &mut *self.rules,
                messages: &mut sink,
                config: &self.config,
            };
            let alive = self
                .dispatcher
                .dispatch(&mut self.avatar, &mut self.session, &mut env);

            if let Some(account) = self.dispatcher.last_account() {
                tracing::debug!(
                    kind = ?account.kind,
                    phase = ?account.ended_at,
                    elapsed = account.elapsed,
                    moves_left = account.moves_after,
                    "turn settled"
                );
                if account.ended_at == DispatchPhase::Dispatching {
                    tracing::warn!(kind = ?account.kind, "no handler registered; degraded to no-op");
                }
                self.events.publish(SessionEvent::Turn { account: *account });
            }

            if !alive {
                let end = self.session.end;
                self.events.publish(SessionEvent::Ended { end });
                tracing::info!(?end, "session stopped accepting turns");
                return end;
            }
            if self.input.is_closed() {
                tracing::warn!("input feed closed mid-session");
                let end = self.session.end;
                self.events.publish(SessionEvent::Ended { end });
                return end;
            }
        }
    }
}
