// Re-exports from rewind-mod-history so users depend on a single crate.
pub use rewind_mod_history::selectors;
pub use rewind_mod_history::{
    Frame, HistoryConfig, HistoryOp, HistoryPatch, HistoryReducer, HistorySlice, HistoryState,
    UndoItem, Undoable,
};
