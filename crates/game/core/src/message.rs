//! Categorized player-facing messages emitted by the dispatch core.
//!
//! Formatting, coloring, and localization live outside this crate; the core
//! only tags each message with a severity category and hands it to whatever
//! sink the embedder wires in.

/// Severity category attached to every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    /// Neutral gameplay information (mode toggles, refusals, diagnostics).
    Info,
    /// Something went wrong for the player (blocked path, failed action).
    Bad,
    /// Flavor output with no gameplay weight.
    Neutral,
}

/// Receiver for categorized messages produced during a dispatch call.
///
/// Implementations must not block; the dispatch loop emits messages inline.
pub trait MessageSink {
    fn emit(&mut self, kind: MessageKind, text: String);

    fn info(&mut self, text: String) {
        self.emit(MessageKind::Info, text);
    }

    fn bad(&mut self, text: String) {
        self.emit(MessageKind::Bad, text);
    }

    fn neutral(&mut self, text: String) {
        self.emit(MessageKind::Neutral, text);
    }
}

/// A single recorded message.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// In-memory [`MessageSink`] used by tests and by embedders that render the
/// log themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns true if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|m| m.text.contains(needle))
    }
}

impl MessageSink for MessageLog {
    fn emit(&mut self, kind: MessageKind, text: String) {
        self.entries.push(Message { kind, text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_kind_and_text() {
        let mut log = MessageLog::new();
        log.info("Safe mode ON!".to_string());
        log.bad("The door is locked.".to_string());

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].kind, MessageKind::Info);
        assert_eq!(log.entries()[1].kind, MessageKind::Bad);
        assert!(log.contains("locked"));
    }
}
