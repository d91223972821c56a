//! Session orchestration around the synchronous dispatch core.
//!
//! `holdout-runtime` wires the blocking dispatch loop into an async world:
//! input events arrive over a channel, the loop runs on a blocking task, and
//! messages/turn accounts fan out on a broadcast bus. Consumers build a
//! [`SessionWorker`], subscribe to its [`EventBus`], and feed it through an
//! [`InputHandle`].
//!
//! Modules are organized by responsibility:
//! - [`worker`] hosts the session loop and its builder
//! - [`input`] bridges async event producers onto the blocking input seam
//! - [`events`] provides the broadcast bus observers subscribe to
//! - [`config`] loads the RON configuration with env overrides
//! - [`telemetry`] sets up tracing for embedding binaries
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod telemetry;
pub mod worker;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{BusSink, EventBus, SessionEvent};
pub use input::{
    input_channel, spawn_event_pump, ChannelInput, EventSource, InputHandle, ScriptedSource,
};
pub use telemetry::init_tracing;
pub use worker::{SessionWorker, SessionWorkerBuilder};
