/// The history slice of the application state.
use std::collections::VecDeque;

use crate::operation::{Frame, Undoable};

/// Undo/redo queues plus group bookkeeping.
///
/// Snapshots are shared behind `Arc` and replaced wholesale by the reducer;
/// nothing reachable from a published snapshot is ever mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState<A: Undoable> {
    /// Most recent frame first.
    pub(crate) undo_queue: VecDeque<Frame<A>>,
    /// Most recently undone frame first.
    pub(crate) redo_queue: VecDeque<Frame<A>>,
    /// Depth of currently open groups.
    pub(crate) group_level: usize,
    /// Whether the innermost open group already received an item.
    pub(crate) group_created: bool,
    /// Hides undo/redo availability without touching the queues.
    pub(crate) paused: bool,
}

impl<A: Undoable> Default for HistoryState<A> {
    fn default() -> Self {
        Self {
            undo_queue: VecDeque::new(),
            redo_queue: VecDeque::new(),
            group_level: 0,
            group_created: false,
            paused: false,
        }
    }
}

impl<A: Undoable> HistoryState<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_queue(&self) -> &VecDeque<Frame<A>> {
        &self.undo_queue
    }

    pub fn redo_queue(&self) -> &VecDeque<Frame<A>> {
        &self.redo_queue
    }

    pub fn group_level(&self) -> usize {
        self.group_level
    }

    pub fn group_created(&self) -> bool {
        self.group_created
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Applies every field set in `patch`, leaving the others untouched.
    pub(crate) fn apply(&mut self, patch: &HistoryPatch<A>) {
        if let Some(queue) = &patch.undo_queue {
            self.undo_queue = queue.iter().cloned().collect();
        }
        if let Some(queue) = &patch.redo_queue {
            self.redo_queue = queue.iter().cloned().collect();
        }
        if let Some(level) = patch.group_level {
            self.group_level = level;
        }
        if let Some(created) = patch.group_created {
            self.group_created = created;
        }
        if let Some(paused) = patch.paused {
            self.paused = paused;
        }
    }
}

/// A partial [`HistoryState`] for rewriting history in place.
///
/// Lets the owning application splice or compact the queues (e.g. collapse
/// several frames into one). Only the fields that are set get replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPatch<A: Undoable> {
    pub undo_queue: Option<Vec<Frame<A>>>,
    pub redo_queue: Option<Vec<Frame<A>>>,
    pub group_level: Option<usize>,
    pub group_created: Option<bool>,
    pub paused: Option<bool>,
}

impl<A: Undoable> Default for HistoryPatch<A> {
    fn default() -> Self {
        Self {
            undo_queue: None,
            redo_queue: None,
            group_level: None,
            group_created: None,
            paused: None,
        }
    }
}

impl<A: Undoable> HistoryPatch<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_queue(mut self, frames: Vec<Frame<A>>) -> Self {
        self.undo_queue = Some(frames);
        self
    }

    pub fn redo_queue(mut self, frames: Vec<Frame<A>>) -> Self {
        self.redo_queue = Some(frames);
        self
    }

    pub fn group_level(mut self, level: usize) -> Self {
        self.group_level = Some(level);
        self
    }

    pub fn group_created(mut self, created: bool) -> Self {
        self.group_created = Some(created);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = Some(paused);
        self
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.undo_queue.is_none()
            && self.redo_queue.is_none()
            && self.group_level.is_none()
            && self.group_created.is_none()
            && self.paused.is_none()
    }
}
