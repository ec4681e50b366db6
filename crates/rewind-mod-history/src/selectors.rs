// Read-only queries over any state that carries a history slice.
use std::collections::VecDeque;
use std::sync::Arc;

use crate::operation::{Frame, Undoable};
use crate::state::HistoryState;

/// A composite application state exposing its history slice.
pub trait HistorySlice {
    type Action: Undoable;

    fn history(&self) -> &HistoryState<Self::Action>;
}

impl<A: Undoable> HistorySlice for HistoryState<A> {
    type Action = A;

    fn history(&self) -> &HistoryState<A> {
        self
    }
}

impl<T: HistorySlice> HistorySlice for Arc<T> {
    type Action = T::Action;

    fn history(&self) -> &HistoryState<T::Action> {
        T::history(self)
    }
}

/// Whether an undo would do anything.
pub fn can_undo<S: HistorySlice>(state: &S) -> bool {
    let history = state.history();
    !history.undo_queue.is_empty() && !history.paused
}

/// Whether a redo would do anything.
pub fn can_redo<S: HistorySlice>(state: &S) -> bool {
    let history = state.history();
    !history.redo_queue.is_empty() && !history.paused
}

/// The frame the next undo would revert.
pub fn undo_head<S: HistorySlice>(state: &S) -> Option<&Frame<S::Action>> {
    state.history().undo_queue.front()
}

/// The frame the next redo would replay.
pub fn redo_head<S: HistorySlice>(state: &S) -> Option<&Frame<S::Action>> {
    state.history().redo_queue.front()
}

/// The most recently recorded action still on the undo queue.
pub fn previous_action<S: HistorySlice>(state: &S) -> Option<&S::Action> {
    undo_head(state).map(|frame| &frame.latest().action)
}

pub fn undo_queue<S: HistorySlice>(state: &S) -> &VecDeque<Frame<S::Action>> {
    &state.history().undo_queue
}

pub fn redo_queue<S: HistorySlice>(state: &S) -> &VecDeque<Frame<S::Action>> {
    &state.history().redo_queue
}

pub fn is_paused<S: HistorySlice>(state: &S) -> bool {
    state.history().paused
}

pub fn group_level<S: HistorySlice>(state: &S) -> usize {
    state.history().group_level
}
