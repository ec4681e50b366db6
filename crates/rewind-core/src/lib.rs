//! Undo/redo middleware for a single-threaded dispatch pipeline.
//!
//! Domain actions that have an entry in a [`RevertingActions`] table are
//! recorded into the history after they reach the reducers. Undo dispatches
//! the inverses of the most recent frame, redo dispatches the originals again,
//! and groups collapse everything they dispatch into one frame.
//!
//! [`Store`] is a small ready-made container; hosts with their own pipeline
//! implement [`Pipeline`] and call [`UndoMiddleware::dispatch`].
pub mod action;
pub mod error;
pub mod history;
pub mod middleware;
pub mod reverting;
pub mod store;

pub use action::{Dispatcher, Group, GroupBody, Operation};
pub use error::HistoryError;
pub use history::selectors;
pub use history::{
    Frame, HistoryConfig, HistoryOp, HistoryPatch, HistoryReducer, HistorySlice, HistoryState,
    UndoItem, Undoable,
};
pub use middleware::{Pipeline, UndoMiddleware};
pub use reverting::{Descriptor, Reverting, RevertingActions};
pub use store::{AppState, DomainReducer, Store, StoreOperation};
