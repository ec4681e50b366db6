/// Operations flowing through the dispatch pipeline.
use std::fmt;

use anyhow::Result;

use crate::history::{HistoryOp, HistoryPatch, UndoItem, Undoable};

/// Scoped dispatch handle handed to a group body.
///
/// Everything dispatched through it goes back through the undo middleware,
/// so it is recorded into the open group (and may open nested groups).
pub trait Dispatcher<A: Undoable, S> {
    fn dispatch(&mut self, op: Operation<A, S>) -> Result<()>;

    /// The live state, for bodies that decide what to dispatch as they go.
    fn state(&self) -> &S;
}

/// Body of a [`Group`] expressed as a closure.
pub type GroupBody<A, S> = Box<dyn FnOnce(&mut dyn Dispatcher<A, S>) -> Result<()>>;

/// A transaction: everything it dispatches undoes and redoes as one step.
pub enum Group<A: Undoable, S> {
    /// A fixed list of operations, dispatched in order.
    Actions(Vec<Operation<A, S>>),
    /// A closure dispatching whatever it needs through the scoped handle.
    Body(GroupBody<A, S>),
}

impl<A: Undoable, S> fmt::Debug for Group<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actions(ops) => f.debug_tuple("Actions").field(ops).finish(),
            Self::Body(_) => f.write_str("Body(..)"),
        }
    }
}

/// Anything that can be dispatched: a domain action, a history transition,
/// or a group of further operations.
pub enum Operation<A: Undoable, S> {
    Action(A),
    History(HistoryOp<A>),
    Group(Group<A, S>),
}

impl<A: Undoable, S> fmt::Debug for Operation<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::History(op) => f.debug_tuple("History").field(op).finish(),
            Self::Group(group) => f.debug_tuple("Group").field(group).finish(),
        }
    }
}

impl<A: Undoable, S> From<A> for Operation<A, S> {
    fn from(action: A) -> Self {
        Self::Action(action)
    }
}

impl<A: Undoable, S> From<HistoryOp<A>> for Operation<A, S> {
    fn from(op: HistoryOp<A>) -> Self {
        Self::History(op)
    }
}

impl<A: Undoable, S> Operation<A, S> {
    pub fn undo() -> Self {
        Self::History(HistoryOp::Undo)
    }

    pub fn redo() -> Self {
        Self::History(HistoryOp::Redo)
    }

    pub fn begin_group() -> Self {
        Self::History(HistoryOp::BeginGroup)
    }

    pub fn end_group() -> Self {
        Self::History(HistoryOp::EndGroup)
    }

    pub fn record(item: UndoItem<A>) -> Self {
        Self::History(HistoryOp::Record(item))
    }

    pub fn clear_history() -> Self {
        Self::History(HistoryOp::Clear)
    }

    pub fn rewrite_history(patch: HistoryPatch<A>) -> Self {
        Self::History(HistoryOp::Rewrite(patch))
    }

    pub fn pause() -> Self {
        Self::History(HistoryOp::SetPaused(true))
    }

    pub fn resume() -> Self {
        Self::History(HistoryOp::SetPaused(false))
    }

    /// Groups whatever `body` dispatches into a single undo step.
    pub fn group<F>(body: F) -> Self
    where
        F: FnOnce(&mut dyn Dispatcher<A, S>) -> Result<()> + 'static,
    {
        Self::Group(Group::Body(Box::new(body)))
    }

    /// Groups a fixed list of operations into a single undo step.
    pub fn group_actions<I>(ops: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Operation<A, S>>,
    {
        Self::Group(Group::Actions(ops.into_iter().map(Into::into).collect()))
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Action(_) => "action",
            Self::History(op) => op.name(),
            Self::Group(_) => "group",
        }
    }
}
