/// Pure transition function for the history slice.
///
/// Every transition takes the current snapshot by reference and returns the
/// next one. Transitions that change nothing hand back the very same `Arc`,
/// so callers can detect "no change" with `Arc::ptr_eq`.
use std::sync::Arc;

use rewind_config::HistoryConfig;

use crate::operation::{Frame, HistoryOp, UndoItem, Undoable};
use crate::state::HistoryState;

/// Applies [`HistoryOp`]s to [`HistoryState`] snapshots within the
/// configured size limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryReducer {
    config: HistoryConfig,
}

impl HistoryReducer {
    pub fn new(config: HistoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Computes the snapshot following `op`.
    pub fn reduce<A: Undoable>(
        &self,
        state: &Arc<HistoryState<A>>,
        op: &HistoryOp<A>,
    ) -> Arc<HistoryState<A>> {
        match op {
            HistoryOp::Record(item) => Arc::new(self.record(state, item.clone())),
            HistoryOp::Undo => self.undo(state),
            HistoryOp::Redo => self.redo(state),
            HistoryOp::BeginGroup => {
                let mut next = HistoryState::clone(state);
                next.group_created = state.group_level > 0;
                next.group_level = state.group_level + 1;
                tracing::debug!(level = next.group_level, "group opened");
                Arc::new(next)
            }
            HistoryOp::EndGroup => match state.group_level.checked_sub(1) {
                Some(level) => {
                    let mut next = HistoryState::clone(state);
                    next.group_level = level;
                    tracing::debug!(level, "group closed");
                    Arc::new(next)
                }
                None => {
                    tracing::warn!("end-group without a matching begin-group; ignoring");
                    Arc::clone(state)
                }
            },
            HistoryOp::Clear => {
                tracing::debug!("history cleared");
                Arc::new(HistoryState::default())
            }
            HistoryOp::Rewrite(patch) => {
                if patch.is_empty() {
                    return Arc::clone(state);
                }
                let mut next = HistoryState::clone(state);
                next.apply(patch);
                tracing::debug!(
                    undo_len = next.undo_queue.len(),
                    redo_len = next.redo_queue.len(),
                    "history rewritten"
                );
                Arc::new(next)
            }
            HistoryOp::SetPaused(paused) => {
                if state.paused == *paused {
                    return Arc::clone(state);
                }
                let mut next = HistoryState::clone(state);
                next.paused = *paused;
                Arc::new(next)
            }
        }
    }

    fn record<A: Undoable>(&self, state: &HistoryState<A>, item: UndoItem<A>) -> HistoryState<A> {
        let joins =
            (state.group_level > 0 && state.group_created) || item.grouped_with_previous;
        let mut next = state.clone();

        if joins && !next.undo_queue.is_empty() {
            let head = &mut next.undo_queue[0];
            *head = head.prepend(item);
        } else {
            next.undo_queue.push_front(Frame::single(item));
        }
        next.undo_queue.truncate(self.config.undo_history_size);
        next.redo_queue.clear();
        if next.group_level > 0 {
            next.group_created = true;
        }

        tracing::debug!(
            joined = joins,
            head_len = next.undo_queue.front().map_or(0, Frame::len),
            undo_len = next.undo_queue.len(),
            "recorded undo item"
        );
        next
    }

    fn undo<A: Undoable>(&self, state: &Arc<HistoryState<A>>) -> Arc<HistoryState<A>> {
        if state.paused || state.undo_queue.is_empty() {
            return Arc::clone(state);
        }
        let mut next = HistoryState::clone(state);
        if let Some(frame) = next.undo_queue.pop_front() {
            next.redo_queue.push_front(frame);
            next.redo_queue.truncate(self.config.redo_history_size);
        }
        Arc::new(next)
    }

    fn redo<A: Undoable>(&self, state: &Arc<HistoryState<A>>) -> Arc<HistoryState<A>> {
        if state.paused || state.redo_queue.is_empty() {
            return Arc::clone(state);
        }
        let mut next = HistoryState::clone(state);
        if let Some(frame) = next.redo_queue.pop_front() {
            next.undo_queue.push_front(frame);
            // Only a rewritten history can push this past the limit
            next.undo_queue.truncate(self.config.undo_history_size);
        }
        Arc::new(next)
    }
}
