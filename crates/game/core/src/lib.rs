//! Deterministic per-turn action dispatch for the holdout survival sim.
//!
//! `holdout-core` converts normalized input into exactly one semantic action
//! per call, classifies the acting context (on foot, at vehicle controls, or
//! driving by remote), routes the action through a lookup table to its
//! handler, and reconciles turn cost, auto-move, and safe-mode side effects.
//! World simulation, pathfinding, rendering, and the individual action
//! implementations all live behind the trait seams in [`world`] and
//! [`action`].
pub mod action;
pub mod avatar;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod message;
pub mod mode;
pub mod safemode;
pub mod session;
pub mod types;
pub mod world;

pub use action::{
    ActionClass, ActionHandler, ActionKind, ActionTable, Direction, HandlerKey, HandlerOutcome,
    HandlerReport, Invocation, TableError,
};
pub use avatar::{Avatar, MovementMode, Restrictions, MOVES_PER_TURN};
pub use config::DispatchConfig;
pub use context::{classify, confined_disabled_set, handler_key, refusal_for, ActingContext};
pub use dispatch::{
    AutoMoveState, Bindings, DispatchEnv, DispatchPhase, Dispatcher, InputEvent, InputSource,
    MouseButton, ResolvedInput, TurnAccount, TurnCtx,
};
pub use message::{Message, MessageKind, MessageLog, MessageSink};
pub use mode::GameMode;
pub use safemode::{SafeMode, SafeModeState};
pub use session::{Session, SessionEnd};
pub use types::{EntityId, Offset, Position};
pub use world::{
    ActivityId, DeviceId, PromptSource, SafeModeRules, ThreatId, VehicleId, World,
};
