pub mod config;

pub use config::{HistoryConfig, MAX_HISTORY_SIZE};
