/// How to revert each kind of undoable action.
///
/// A [`RevertingActions`] table is built once when the middleware is
/// configured. Action kinds missing from the table are never recorded, so the
/// only way to reach an unconfigured kind at undo time is a rewritten history;
/// the middleware checks rewrites against this table before applying them.
use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::error::HistoryError;
use crate::history::selectors::previous_action;
use crate::history::{Frame, HistoryPatch, HistorySlice, UndoItem, Undoable};

/// Builds the inverse of an action from the action and its captured args.
pub type InverseFn<A> = Box<dyn Fn(&A, Option<&<A as Undoable>::Args>) -> Result<A>>;

/// Captures the args an inverse will need, from the state before the action.
pub type CreateArgsFn<A, S> = Box<dyn Fn(&S, &A) -> Result<<A as Undoable>::Args>>;

/// Decides whether an action merges into the frame of the previous one.
/// Called with `(action, previous_action)`.
pub type GroupWithPreviousFn<A> = Box<dyn Fn(&A, &A) -> bool>;

/// Inverse builder plus optional arg capture and merge predicate.
pub struct Descriptor<A: Undoable, S> {
    action: InverseFn<A>,
    create_args: Option<CreateArgsFn<A, S>>,
    group_with_previous: Option<GroupWithPreviousFn<A>>,
}

impl<A: Undoable, S> Descriptor<A, S> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&A, Option<&A::Args>) -> Result<A> + 'static,
    {
        Self {
            action: Box::new(action),
            create_args: None,
            group_with_previous: None,
        }
    }

    pub fn create_args<F>(mut self, create_args: F) -> Self
    where
        F: Fn(&S, &A) -> Result<A::Args> + 'static,
    {
        self.create_args = Some(Box::new(create_args));
        self
    }

    pub fn group_with_previous<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&A, &A) -> bool + 'static,
    {
        self.group_with_previous = Some(Box::new(predicate));
        self
    }
}

/// Reverting configuration for one action kind.
pub enum Reverting<A: Undoable, S> {
    /// Just an inverse builder.
    Inverse(InverseFn<A>),
    /// Inverse builder with optional arg capture and merge predicate.
    Descriptor(Descriptor<A, S>),
}

impl<A: Undoable, S> Reverting<A, S> {
    /// Builds the action that undoes `action`.
    pub fn inverse(&self, action: &A, args: Option<&A::Args>) -> Result<A> {
        match self {
            Self::Inverse(build) => build(action, args),
            Self::Descriptor(d) => (d.action)(action, args),
        }
    }

    /// Captures undo args from the state before `action` runs.
    pub fn create_args(&self, state: &S, action: &A) -> Result<Option<A::Args>> {
        match self {
            Self::Descriptor(Descriptor {
                create_args: Some(create),
                ..
            }) => create(state, action).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether `action` should merge into the frame holding `previous`.
    pub fn group_with_previous(&self, action: &A, previous: &A) -> bool {
        match self {
            Self::Descriptor(Descriptor {
                group_with_previous: Some(predicate),
                ..
            }) => predicate(action, previous),
            _ => false,
        }
    }
}

impl<A: Undoable, S> fmt::Debug for Reverting<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverse(_) => f.write_str("Inverse(..)"),
            Self::Descriptor(d) => f
                .debug_struct("Descriptor")
                .field("create_args", &d.create_args.is_some())
                .field("group_with_previous", &d.group_with_previous.is_some())
                .finish(),
        }
    }
}

/// Table of reverting configurations keyed by action kind.
pub struct RevertingActions<A: Undoable, S> {
    table: HashMap<A::Kind, Reverting<A, S>>,
}

impl<A: Undoable, S> Default for RevertingActions<A, S> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<A: Undoable, S> fmt::Debug for RevertingActions<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.table.iter()).finish()
    }
}

impl<A: Undoable, S> RevertingActions<A, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reverts `kind` with a plain inverse builder.
    pub fn with_inverse<F>(mut self, kind: A::Kind, inverse: F) -> Self
    where
        F: Fn(&A, Option<&A::Args>) -> Result<A> + 'static,
    {
        self.insert(kind, Reverting::Inverse(Box::new(inverse)));
        self
    }

    /// Reverts `kind` with a full descriptor.
    pub fn with_descriptor(mut self, kind: A::Kind, descriptor: Descriptor<A, S>) -> Self {
        self.insert(kind, Reverting::Descriptor(descriptor));
        self
    }

    /// Registers `reverting` for `kind`, returning the previous entry.
    pub fn insert(&mut self, kind: A::Kind, reverting: Reverting<A, S>) -> Option<Reverting<A, S>> {
        let previous = self.table.insert(kind, reverting);
        if previous.is_some() {
            tracing::debug!(?kind, "replaced reverting action");
        }
        previous
    }

    pub fn get(&self, kind: A::Kind) -> Option<&Reverting<A, S>> {
        self.table.get(&kind)
    }

    pub fn contains(&self, kind: A::Kind) -> bool {
        self.table.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Builds the inverse of a recorded item.
    ///
    /// # Errors
    ///
    /// [`HistoryError::UnconfiguredReverse`] if the item's kind has no entry,
    /// or whatever the inverse builder returns.
    pub fn revert(&self, item: &UndoItem<A>) -> Result<A> {
        let kind = item.action.kind();
        let reverting = self
            .get(kind)
            .ok_or_else(|| HistoryError::unconfigured(kind))?;
        reverting.inverse(&item.action, item.args.as_ref())
    }

    /// Inverses for every item of `frame`, in the order they must be applied.
    pub fn inverses(&self, frame: &Frame<A>) -> Result<Vec<A>> {
        frame.undo_order().map(|item| self.revert(item)).collect()
    }

    /// Fails on the first item in `patch` whose kind has no entry.
    pub fn check_patch(&self, patch: &HistoryPatch<A>) -> Result<()> {
        let frames = patch.undo_queue.iter().chain(&patch.redo_queue).flatten();
        for frame in frames {
            if let Some(item) = frame.items().iter().find(|i| !self.contains(i.action.kind())) {
                return Err(HistoryError::unconfigured(item.action.kind()).into());
            }
        }
        Ok(())
    }
}

impl<A, S> RevertingActions<A, S>
where
    A: Undoable,
    S: HistorySlice<Action = A>,
{
    /// Builds the undo item for `action` from the state before it runs.
    ///
    /// Returns `None` for kinds that aren't undoable.
    pub fn record_item(&self, state: &S, action: &A) -> Result<Option<UndoItem<A>>> {
        let Some(reverting) = self.get(action.kind()) else {
            return Ok(None);
        };
        let args = reverting.create_args(state, action)?;
        let grouped_with_previous = previous_action(state)
            .is_some_and(|previous| reverting.group_with_previous(action, previous));
        Ok(Some(UndoItem {
            action: action.clone(),
            args,
            grouped_with_previous,
        }))
    }
}
