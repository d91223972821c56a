//! End-to-end worker test: async input feed in, events out, clean shutdown.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{FixedPrompts, GridWorld, NameBindings, RecordingRules, walking_table};
use holdout_core::{DispatchConfig, InputEvent, MessageKind, SessionEnd};
use holdout_runtime::{
    EventBus, ScriptedSource, SessionEvent, SessionWorker, input_channel, spawn_event_pump,
};

#[tokio::test]
async fn worker_runs_a_session_to_abandonment() {
    let calls = Arc::new(AtomicUsize::new(0));
    let events = EventBus::new(32);
    let mut observer = events.subscribe();

    let (handle, input) = input_channel(16);
    let worker = SessionWorker::builder(DispatchConfig::default())
        .table(walking_table(&calls))
        .world(Box::new(GridWorld::default()))
        .bindings(Box::new(NameBindings))
        .prompts(Box::new(FixedPrompts(true)))
        .rules(Box::new(RecordingRules::default()))
        .events(events.clone())
        .build(input)
        .expect("all collaborators provided");

    let source = ScriptedSource::new(vec![
        InputEvent::Keystroke("move_east".to_string()),
        InputEvent::Keystroke("toggle_safe_mode".to_string()),
        InputEvent::Keystroke("quit".to_string()),
    ]);
    let pump = spawn_event_pump(Box::new(source), handle);

    let end = worker.run().await.expect("worker joins cleanly");
    assert_eq!(end, SessionEnd::Abandoned);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    pump.await.expect("pump joins cleanly");

    let mut saw_turn = false;
    let mut saw_toggle_message = false;
    let mut saw_end = false;
    while let Ok(event) = observer.try_recv() {
        match event {
            SessionEvent::Turn { .. } => saw_turn = true,
            SessionEvent::Message { kind, text } => {
                if kind == MessageKind::Info && text.contains("Safe mode OFF") {
                    saw_toggle_message = true;
                }
            }
            SessionEvent::Ended { end } => {
                saw_end = true;
                assert_eq!(end, SessionEnd::Abandoned);
            }
        }
    }
    assert!(saw_turn, "turn accounts are published");
    assert!(saw_toggle_message, "core messages reach the bus");
    assert!(saw_end, "session end is published");
}

#[tokio::test]
async fn worker_stops_when_the_input_feed_closes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (handle, input) = input_channel(4);
    let worker = SessionWorker::builder(DispatchConfig::default())
        .table(walking_table(&calls))
        .world(Box::new(GridWorld::default()))
        .bindings(Box::new(NameBindings))
        .prompts(Box::new(FixedPrompts(false)))
        .rules(Box::new(RecordingRules::default()))
        .build(input)
        .expect("all collaborators provided");

    // One step, then hang up.
    let pump = spawn_event_pump(
        Box::new(ScriptedSource::new(vec![InputEvent::Keystroke(
            "move_north".to_string(),
        )])),
        handle,
    );

    let end = worker.run().await.expect("worker joins cleanly");
    assert_eq!(end, SessionEnd::None, "session itself never ended");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    pump.await.expect("pump joins cleanly");
}

#[tokio::test]
async fn builder_refuses_to_run_without_a_world() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (_handle, input) = input_channel(4);
    let result = SessionWorker::builder(DispatchConfig::default())
        .table(walking_table(&calls))
        .bindings(Box::new(NameBindings))
        .prompts(Box::new(FixedPrompts(true)))
        .rules(Box::new(RecordingRules::default()))
        .build(input);

    assert!(result.is_err());
}
