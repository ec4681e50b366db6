/// Errors raised by the undo middleware.
use thiserror::Error;

/// Misuse or misconfiguration detected while dispatching.
///
/// Returned inside `anyhow::Error`; callers that need to tell the cases apart
/// can `downcast_ref::<HistoryError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A recorded action has no reverting descriptor.
    #[error("no reverting action configured for `{kind}`")]
    UnconfiguredReverse { kind: String },

    /// Undo/redo requested while a group transaction is still open.
    #[error("cannot {op} while a group is open (level {level})")]
    GroupOpen { op: &'static str, level: usize },
}

impl HistoryError {
    pub(crate) fn unconfigured(kind: impl std::fmt::Debug) -> Self {
        Self::UnconfiguredReverse {
            kind: format!("{kind:?}"),
        }
    }
}
