/// Core types for recorded operations, frames and history transitions.
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::state::HistoryPatch;

/// A domain operation the history can record.
///
/// `Kind` is the discriminator used to look up how to revert an action;
/// `Args` is whatever snapshot an inverse needs (e.g. the value before a
/// "set" action). Use `()` when no action needs one.
pub trait Undoable: Clone + fmt::Debug {
    type Kind: Copy + Eq + Hash + fmt::Debug;
    type Args: Clone + fmt::Debug + PartialEq;

    fn kind(&self) -> Self::Kind;
}

/// The smallest recorded unit: one action plus its captured arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoItem<A: Undoable> {
    /// The action as originally dispatched.
    pub action: A,
    /// Snapshot captured at record time, needed to build the inverse.
    pub args: Option<A::Args>,
    /// Merge into the head frame even when no group is open.
    pub grouped_with_previous: bool,
}

impl<A: Undoable> UndoItem<A> {
    pub fn new(action: A) -> Self {
        Self {
            action,
            args: None,
            grouped_with_previous: false,
        }
    }

    pub fn with_args(mut self, args: A::Args) -> Self {
        self.args = Some(args);
        self
    }

    pub fn grouped(mut self, grouped_with_previous: bool) -> Self {
        self.grouped_with_previous = grouped_with_previous;
        self
    }
}

/// One entry of the undo or redo queue.
///
/// Items are stored most-recent-first. A frame is never empty and never
/// mutated once built; appending produces a new frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<A: Undoable>(Arc<[UndoItem<A>]>);

impl<A: Undoable> Frame<A> {
    /// A frame holding a single item.
    pub fn single(item: UndoItem<A>) -> Self {
        Self(Arc::from(vec![item]))
    }

    /// Builds a frame from items in storage order (most recent first).
    ///
    /// Returns `None` for an empty list.
    pub fn from_items(items: Vec<UndoItem<A>>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(Arc::from(items)))
        }
    }

    /// Concatenates frames into one, newest frame first.
    ///
    /// Used to compact several undo steps into a single transaction.
    pub fn merge<'a>(frames: impl IntoIterator<Item = &'a Frame<A>>) -> Option<Self>
    where
        A: 'a,
    {
        let items: Vec<UndoItem<A>> = frames
            .into_iter()
            .flat_map(|frame| frame.items().iter().cloned())
            .collect();
        Self::from_items(items)
    }

    /// Returns a new frame with `item` in front of this frame's items.
    pub fn prepend(&self, item: UndoItem<A>) -> Self {
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.push(item);
        items.extend(self.0.iter().cloned());
        Self(Arc::from(items))
    }

    /// Items in storage order (most recent first).
    pub fn items(&self) -> &[UndoItem<A>] {
        &self.0
    }

    /// The most recently recorded item.
    pub fn latest(&self) -> &UndoItem<A> {
        &self.0[0]
    }

    /// Items in the order their inverses must be applied.
    pub fn undo_order(&self) -> impl Iterator<Item = &UndoItem<A>> {
        self.0.iter()
    }

    /// Items in the order they were originally performed.
    pub fn redo_order(&self) -> impl Iterator<Item = &UndoItem<A>> {
        self.0.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether both frames share the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// A transition understood by the history reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOp<A: Undoable> {
    /// Fold an item into the undo queue and drop the redo queue.
    Record(UndoItem<A>),
    /// Move the undo head to the redo queue.
    Undo,
    /// Move the redo head back to the undo queue.
    Redo,
    /// Open a (possibly nested) group.
    BeginGroup,
    /// Close the innermost group.
    EndGroup,
    /// Reset to an empty history.
    Clear,
    /// Shallow-merge the given fields into the current state.
    Rewrite(HistoryPatch<A>),
    /// Suppress (or restore) undo/redo availability.
    SetPaused(bool),
}

impl<A: Undoable> HistoryOp<A> {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::BeginGroup => "begin-group",
            Self::EndGroup => "end-group",
            Self::Clear => "clear",
            Self::Rewrite(_) => "rewrite",
            Self::SetPaused(_) => "set-paused",
        }
    }
}
