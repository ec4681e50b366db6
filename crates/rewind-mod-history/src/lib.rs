//! Undo/redo history store.
//!
//! Holds the undo and redo queues as immutable snapshots and a pure
//! `HistoryReducer` that moves between them. Grouping, bounded eviction and
//! the pause flag all live here; deciding *what* to record is left to the
//! dispatch layer built on top.
pub mod operation;
pub mod reducer;
pub mod selectors;
pub mod state;

pub use operation::{Frame, HistoryOp, UndoItem, Undoable};
pub use reducer::HistoryReducer;
pub use rewind_config::HistoryConfig;
pub use selectors::HistorySlice;
pub use state::{HistoryPatch, HistoryState};
