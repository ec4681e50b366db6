/// A minimal dispatch container wired to the undo middleware.
///
/// Holds a domain state reduced by a pure function plus the history slice,
/// and routes every dispatch through [`UndoMiddleware`]. Applications with
/// their own pipeline implement [`Pipeline`] instead and drive the middleware
/// directly.
use std::sync::Arc;

use anyhow::Result;

use crate::action::{Dispatcher, Operation};
use crate::history::selectors;
use crate::history::{
    HistoryConfig, HistoryOp, HistoryPatch, HistoryReducer, HistorySlice, HistoryState, Undoable,
};
use crate::middleware::{Pipeline, UndoMiddleware};
use crate::reverting::RevertingActions;

/// Pure reducer for the domain slice.
pub type DomainReducer<S, A> = Box<dyn Fn(&S, &A) -> S>;

/// Composite state: the application's own slice next to the history slice.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState<S, A: Undoable> {
    pub domain: S,
    pub history: Arc<HistoryState<A>>,
}

impl<S, A: Undoable> HistorySlice for AppState<S, A> {
    type Action = A;

    fn history(&self) -> &HistoryState<A> {
        &self.history
    }
}

/// Operation type accepted by a [`Store`].
pub type StoreOperation<S, A> = Operation<A, AppState<S, A>>;

/// The reducer half of the store; the end of the middleware chain.
struct Reducers<S, A: Undoable> {
    state: AppState<S, A>,
    domain: DomainReducer<S, A>,
    history: HistoryReducer,
}

impl<S, A: Undoable> Pipeline for Reducers<S, A> {
    type Action = A;
    type State = AppState<S, A>;

    fn state(&self) -> &AppState<S, A> {
        &self.state
    }

    fn next(&mut self, op: &StoreOperation<S, A>) -> Result<()> {
        match op {
            Operation::Action(action) => {
                self.state.domain = (self.domain)(&self.state.domain, action);
            }
            Operation::History(op) => {
                self.state.history = self.history.reduce(&self.state.history, op);
            }
            // Groups only reach the reducers as their begin/end markers
            Operation::Group(_) => {}
        }
        Ok(())
    }
}

/// Single-threaded store with undo/redo support.
pub struct Store<S, A: Undoable> {
    middleware: UndoMiddleware<A, AppState<S, A>>,
    reducers: Reducers<S, A>,
}

impl<S, A: Undoable> Store<S, A> {
    /// Creates a store with the default history limits.
    pub fn new<F>(initial: S, reducer: F, reverting: RevertingActions<A, AppState<S, A>>) -> Self
    where
        F: Fn(&S, &A) -> S + 'static,
    {
        Self {
            middleware: UndoMiddleware::new(reverting),
            reducers: Reducers {
                state: AppState {
                    domain: initial,
                    history: Arc::new(HistoryState::new()),
                },
                domain: Box::new(reducer),
                history: HistoryReducer::default(),
            },
        }
    }

    /// Replaces the history limits. Applies from the next transition on.
    pub fn with_history_config(mut self, config: HistoryConfig) -> Self {
        tracing::debug!(
            undo = config.undo_history_size,
            redo = config.redo_history_size,
            "history limits"
        );
        self.reducers.history = HistoryReducer::new(config);
        self
    }

    /// Dispatches an action or history operation through the middleware.
    pub fn dispatch(&mut self, op: impl Into<StoreOperation<S, A>>) -> Result<()> {
        self.middleware.dispatch(&mut self.reducers, op.into())
    }

    pub fn state(&self) -> &AppState<S, A> {
        &self.reducers.state
    }

    pub fn domain(&self) -> &S {
        &self.reducers.state.domain
    }

    pub fn history(&self) -> &Arc<HistoryState<A>> {
        &self.reducers.state.history
    }

    pub fn can_undo(&self) -> bool {
        selectors::can_undo(self.state())
    }

    pub fn can_redo(&self) -> bool {
        selectors::can_redo(self.state())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.dispatch(HistoryOp::Undo)
    }

    pub fn redo(&mut self) -> Result<()> {
        self.dispatch(HistoryOp::Redo)
    }

    /// Runs `body` as one undo step.
    pub fn group<F>(&mut self, body: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Dispatcher<A, AppState<S, A>>) -> Result<()> + 'static,
    {
        self.dispatch(Operation::group(body))
    }

    /// Dispatches `ops` in order as one undo step.
    pub fn group_actions<I>(&mut self, ops: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<StoreOperation<S, A>>,
    {
        self.dispatch(Operation::group_actions(ops))
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.dispatch(HistoryOp::Clear)
    }

    pub fn rewrite_history(&mut self, patch: HistoryPatch<A>) -> Result<()> {
        self.dispatch(HistoryOp::Rewrite(patch))
    }

    pub fn pause(&mut self) -> Result<()> {
        self.dispatch(HistoryOp::SetPaused(true))
    }

    pub fn resume(&mut self) -> Result<()> {
        self.dispatch(HistoryOp::SetPaused(false))
    }
}

impl<S: std::fmt::Debug, A: Undoable> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.reducers.state)
            .field("middleware", &self.middleware)
            .finish()
    }
}
