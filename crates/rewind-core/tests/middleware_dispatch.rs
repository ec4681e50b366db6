// Drives the middleware through a host-owned pipeline and checks what
// reaches the reducers, in order.

mod common;

use std::sync::Arc;

use anyhow::Result;
use common::{reduce, reverting, Counter, CounterState};
use rewind_core::{
    HistoryOp, HistoryReducer, HistoryState, Operation, Pipeline, UndoItem, UndoMiddleware,
};

/// A pipeline that reduces for real and keeps a log of forwarded operations.
struct LoggingHost {
    state: CounterState,
    reducer: HistoryReducer,
    log: Vec<String>,
}

impl LoggingHost {
    fn new() -> Self {
        common::init_tracing();
        Self {
            state: CounterState {
                domain: 0,
                history: Arc::new(HistoryState::new()),
            },
            reducer: HistoryReducer::default(),
            log: Vec::new(),
        }
    }

    fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

impl Pipeline for LoggingHost {
    type Action = Counter;
    type State = CounterState;

    fn state(&self) -> &CounterState {
        &self.state
    }

    fn next(&mut self, op: &Operation<Counter, CounterState>) -> Result<()> {
        match op {
            Operation::Action(action) => {
                self.log.push(format!("{action:?}"));
                self.state.domain = reduce(&self.state.domain, action);
            }
            Operation::History(history) => {
                self.log.push(history.name().to_string());
                self.state.history = self.reducer.reduce(&self.state.history, history);
            }
            Operation::Group(_) => self.log.push("group".to_string()),
        }
        Ok(())
    }
}

fn log(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| e.to_string()).collect()
}

#[test]
fn test_action_is_forwarded_before_it_is_recorded() {
    let mut host = LoggingHost::new();
    let mut mw = UndoMiddleware::new(reverting());

    mw.dispatch(&mut host, Counter::Set(4).into()).unwrap();
    mw.dispatch(&mut host, Counter::Set(9).into()).unwrap();

    assert_eq!(host.take_log(), log(&["Set(4)", "record", "Set(9)", "record"]));
    let head = host.state.history.undo_queue()[0].latest();
    assert_eq!(head, &UndoItem::new(Counter::Set(9)).with_args(4));
}

#[test]
fn test_replayed_actions_are_not_recorded() {
    let mut host = LoggingHost::new();
    let mut mw = UndoMiddleware::new(reverting());
    mw.dispatch(&mut host, Counter::Increment.into()).unwrap();
    host.take_log();

    mw.dispatch(&mut host, Operation::undo()).unwrap();
    assert_eq!(host.take_log(), log(&["undo", "Decrement"]));
    mw.dispatch(&mut host, Operation::redo()).unwrap();
    assert_eq!(host.take_log(), log(&["redo", "Increment"]));

    assert!(!mw.is_replaying());
    assert_eq!(host.state.domain, 1);
    assert_eq!(host.state.history.undo_queue().len(), 1);
}

#[test]
fn test_group_markers_surround_group_contents() {
    let mut host = LoggingHost::new();
    let mut mw = UndoMiddleware::new(reverting());

    let op = Operation::group_actions([
        Operation::from(Counter::Increment),
        Operation::from(Counter::NotUndoable),
        Operation::from(HistoryOp::Clear),
    ]);
    mw.dispatch(&mut host, op).unwrap();

    assert_eq!(
        host.take_log(),
        log(&[
            "group",
            "begin-group",
            "Increment",
            "record",
            "NotUndoable",
            "clear",
            "end-group",
        ])
    );
    // Clear inside the group reset the level; the closing marker was ignored
    assert_eq!(host.state.history.group_level(), 0);
}

#[test]
fn test_middlewares_are_independent() {
    let mut host = LoggingHost::new();
    let mut recording = UndoMiddleware::new(reverting());
    let mut empty = UndoMiddleware::new(rewind_core::RevertingActions::new());

    empty.dispatch(&mut host, Counter::Increment.into()).unwrap();
    recording.dispatch(&mut host, Counter::Increment.into()).unwrap();

    assert_eq!(host.take_log(), log(&["Increment", "Increment", "record"]));
    assert!(empty.reverting().is_empty());
}
