//! Action domain: the vocabulary, the lookup table, and the built-ins.
//!
//! - `kind`: [`ActionKind`], [`Direction`], and [`ActionClass`]: the finite
//!   set of semantic intents and their derived gating data.
//! - `table`: [`ActionTable`] and the [`ActionHandler`] contract, the seam
//!   to the external handler library.
//! - `builtin`: dispatcher-owned handlers (viewport, turn passing, safe-mode
//!   family, session prompts).

pub(crate) mod builtin;
mod kind;
mod table;

pub use kind::{ActionClass, ActionKind, Direction};
pub use table::{
    ActionHandler, ActionTable, HandlerKey, HandlerOutcome, HandlerReport, Invocation, TableError,
};
