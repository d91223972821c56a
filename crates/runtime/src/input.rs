//! Bridging async input producers onto the core's blocking input seam.
//!
//! The dispatch core blocks for one event at a time; UI layers produce
//! events asynchronously. An [`EventSource`] pushes into a bounded channel,
//! and [`ChannelInput`] drains it from the session's blocking thread.

use async_trait::async_trait;
use holdout_core::{InputEvent, InputSource, MouseButton, Position};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Async producer of normalized input events.
///
/// `None` ends the feed; the session worker winds the session down once the
/// channel drains.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Option<InputEvent>;
}

/// Sender half handed to UI layers and tests.
#[derive(Clone, Debug)]
pub struct InputHandle {
    tx: mpsc::Sender<InputEvent>,
}

impl InputHandle {
    pub async fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    pub async fn keystroke(&self, label: impl Into<String>) -> bool {
        self.send(InputEvent::Keystroke(label.into())).await
    }

    pub async fn click(&self, button: MouseButton, target: Position) -> bool {
        self.send(InputEvent::Mouse { button, target }).await
    }

    pub async fn timeout(&self) -> bool {
        self.send(InputEvent::Timeout).await
    }
}

/// Blocking [`InputSource`] backed by a tokio channel.
///
/// Must only be polled from a blocking context (the worker runs dispatch on
/// `spawn_blocking`); `blocking_recv` would panic inside an async task.
pub struct ChannelInput {
    rx: mpsc::Receiver<InputEvent>,
    closed: bool,
}

impl ChannelInput {
    /// True once the feeding side hung up and the buffer drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl InputSource for ChannelInput {
    fn next_event(&mut self) -> Option<InputEvent> {
        match self.rx.blocking_recv() {
            Some(event) => Some(event),
            None => {
                self.closed = true;
                None
            }
        }
    }
}

/// Create the handle/source pair for one session.
pub fn input_channel(buffer: usize) -> (InputHandle, ChannelInput) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (InputHandle { tx }, ChannelInput { rx, closed: false })
}

/// Pump an [`EventSource`] into a session's input channel until either side
/// finishes.
pub fn spawn_event_pump(
    mut source: Box<dyn EventSource>,
    handle: InputHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = source.next_event().await {
            if !handle.send(event).await {
                break;
            }
        }
    })
}

/// Replays a fixed script of events; used by tests and demos.
pub struct ScriptedSource {
    events: std::vec::IntoIter<InputEvent>,
}

impl ScriptedSource {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn next_event(&mut self) -> Option<InputEvent> {
        self.events.next()
    }
}
