/// Undo middleware: sits in the dispatch path and drives the history.
///
/// Every operation is classified against the state *before* it is forwarded:
///
/// - plain actions with a reverting entry get an undo item recorded right
///   after they reach the reducers;
/// - undo replays the inverses of the head frame, redo replays its original
///   actions, both with recording suppressed;
/// - groups are wrapped in begin/end markers so everything they dispatch
///   lands in one frame.
///
/// Re-dispatches go back through [`UndoMiddleware::dispatch`] with the same
/// host, synchronously.
use anyhow::Result;

use crate::action::{Dispatcher, Group, Operation};
use crate::error::HistoryError;
use crate::history::selectors::{can_redo, can_undo, group_level, redo_head, undo_head};
use crate::history::{HistoryOp, HistorySlice, UndoItem, Undoable};
use crate::reverting::RevertingActions;

/// The host dispatch pipeline as seen by the middleware.
pub trait Pipeline {
    type Action: Undoable;
    type State: HistorySlice<Action = Self::Action>;

    /// Current composite state.
    fn state(&self) -> &Self::State;

    /// Hands `op` to the reducers.
    fn next(&mut self, op: &Operation<Self::Action, Self::State>) -> Result<()>;
}

/// What to do once an operation has been forwarded.
enum Plan<A: Undoable> {
    Forward,
    Record(UndoItem<A>),
    Replay(Vec<A>),
    Group,
}

/// Records undoable actions and replays them on undo/redo.
pub struct UndoMiddleware<A: Undoable, S> {
    reverting: RevertingActions<A, S>,
    /// Set while undo/redo replays a frame so replays aren't recorded again.
    replaying: bool,
}

impl<A: Undoable, S> std::fmt::Debug for UndoMiddleware<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoMiddleware")
            .field("reverting", &self.reverting)
            .field("replaying", &self.replaying)
            .finish()
    }
}

impl<A, S> UndoMiddleware<A, S>
where
    A: Undoable,
    S: HistorySlice<Action = A>,
{
    pub fn new(reverting: RevertingActions<A, S>) -> Self {
        Self {
            reverting,
            replaying: false,
        }
    }

    pub fn reverting(&self) -> &RevertingActions<A, S> {
        &self.reverting
    }

    /// Whether an undo/redo replay is in progress.
    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Dispatch entry point.
    ///
    /// # Errors
    ///
    /// [`HistoryError`] for misuse (undo inside an open group, unconfigured
    /// reverse); anything returned by the host or a configured callback is
    /// passed through unchanged.
    pub fn dispatch<P>(&mut self, host: &mut P, op: Operation<A, S>) -> Result<()>
    where
        P: Pipeline<Action = A, State = S>,
    {
        tracing::trace!(op = op.name(), replaying = self.replaying, "dispatch");
        let plan = self.plan(host.state(), &op)?;
        host.next(&op)?;

        match plan {
            Plan::Forward => Ok(()),
            Plan::Record(item) => self.dispatch(host, Operation::record(item)),
            Plan::Replay(actions) => self.replay(host, actions),
            Plan::Group => match op {
                Operation::Group(group) => self.run_group(host, group),
                _ => Ok(()),
            },
        }
    }

    /// Classifies `op` against the state before it is forwarded.
    fn plan(&self, state: &S, op: &Operation<A, S>) -> Result<Plan<A>> {
        let plan = match op {
            Operation::History(HistoryOp::Undo) => {
                ensure_no_open_group(state, "undo")?;
                match undo_head(state) {
                    Some(frame) if can_undo(state) => {
                        let inverses = self.reverting.inverses(frame)?;
                        tracing::debug!(items = inverses.len(), "undo");
                        Plan::Replay(inverses)
                    }
                    _ => Plan::Forward,
                }
            }
            Operation::History(HistoryOp::Redo) => {
                ensure_no_open_group(state, "redo")?;
                match redo_head(state) {
                    Some(frame) if can_redo(state) => {
                        let originals: Vec<A> =
                            frame.redo_order().map(|item| item.action.clone()).collect();
                        tracing::debug!(items = originals.len(), "redo");
                        Plan::Replay(originals)
                    }
                    _ => Plan::Forward,
                }
            }
            Operation::History(HistoryOp::Rewrite(patch)) => {
                self.reverting.check_patch(patch)?;
                Plan::Forward
            }
            Operation::History(_) => Plan::Forward,
            Operation::Group(_) => Plan::Group,
            Operation::Action(_) if self.replaying => Plan::Forward,
            Operation::Action(action) => match self.reverting.record_item(state, action)? {
                Some(item) => Plan::Record(item),
                None => Plan::Forward,
            },
        };
        Ok(plan)
    }

    /// Dispatches `actions` in order with recording suppressed.
    fn replay<P>(&mut self, host: &mut P, actions: Vec<A>) -> Result<()>
    where
        P: Pipeline<Action = A, State = S>,
    {
        let was_replaying = std::mem::replace(&mut self.replaying, true);
        let result = actions
            .into_iter()
            .try_for_each(|action| self.dispatch(&mut *host, Operation::Action(action)));
        self.replaying = was_replaying;
        result
    }

    /// Runs a group body between begin/end markers.
    ///
    /// The end marker is dispatched even if the body fails, so a failed body
    /// doesn't leave the group open.
    fn run_group<P>(&mut self, host: &mut P, group: Group<A, S>) -> Result<()>
    where
        P: Pipeline<Action = A, State = S>,
    {
        self.dispatch(host, Operation::begin_group())?;
        let body = match group {
            Group::Actions(ops) => ops
                .into_iter()
                .try_for_each(|op| self.dispatch(&mut *host, op)),
            Group::Body(body) => body(&mut Scope {
                middleware: &mut *self,
                host: &mut *host,
            }),
        };
        let closed = self.dispatch(host, Operation::end_group());
        body.and(closed)
    }
}

fn ensure_no_open_group<S: HistorySlice>(state: &S, op: &'static str) -> Result<()> {
    let level = group_level(state);
    if level > 0 {
        return Err(HistoryError::GroupOpen { op, level }.into());
    }
    Ok(())
}

/// Dispatch handle passed to group bodies.
struct Scope<'a, A: Undoable, S, P> {
    middleware: &'a mut UndoMiddleware<A, S>,
    host: &'a mut P,
}

impl<A, S, P> Dispatcher<A, S> for Scope<'_, A, S, P>
where
    A: Undoable,
    S: HistorySlice<Action = A>,
    P: Pipeline<Action = A, State = S>,
{
    fn dispatch(&mut self, op: Operation<A, S>) -> Result<()> {
        self.middleware.dispatch(&mut *self.host, op)
    }

    fn state(&self) -> &S {
        self.host.state()
    }
}
