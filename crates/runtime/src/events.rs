//! Broadcast bus carrying session notifications to observers.
//!
//! The dispatch core pushes categorized messages through its [`MessageSink`]
//! seam; the worker wraps that seam in [`BusSink`] so every message, turn
//! account, and session end fans out to however many subscribers care.

use holdout_core::{MessageKind, MessageSink, SessionEnd, TurnAccount};
use tokio::sync::broadcast;

/// One observable session notification.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// A categorized player-facing message.
    Message { kind: MessageKind, text: String },
    /// A dispatch call finished; the account says what it did and cost.
    Turn { account: TurnAccount },
    /// The session stopped accepting turns.
    Ended { end: SessionEnd },
}

/// Fan-out event channel; cheap to clone, subscribers join at any time.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish, best effort; a bus with no subscribers drops events.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// [`MessageSink`] adapter publishing onto the bus.
pub struct BusSink<'a> {
    bus: &'a EventBus,
}

impl<'a> BusSink<'a> {
    pub fn new(bus: &'a EventBus) -> Self {
        Self { bus }
    }
}

impl MessageSink for BusSink<'_> {
    fn emit(&mut self, kind: MessageKind, text: String) {
        self.bus.publish(SessionEvent::Message { kind, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_reach_subscribers() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();

        let mut sink = BusSink::new(&bus);
        sink.info("Safe mode ON!".to_string());

        match rx.try_recv() {
            Ok(SessionEvent::Message { kind, text }) => {
                assert_eq!(kind, MessageKind::Info);
                assert!(text.contains("Safe mode"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new(8);
        bus.publish(SessionEvent::Ended {
            end: SessionEnd::Saved,
        });
    }
}
