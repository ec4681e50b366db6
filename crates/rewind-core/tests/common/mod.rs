#![allow(dead_code)]

use rewind_core::{AppState, Descriptor, RevertingActions, Store, Undoable};

/// Counter actions used across the integration tests.
#[derive(Debug, Clone, PartialEq)]
pub enum Counter {
    Increment,
    Decrement,
    Set(i64),
    Multiply(i64),
    Add(i64),
    Remove(i64),
    /// Reduced but never recorded.
    NotUndoable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Increment,
    Decrement,
    Set,
    Multiply,
    Add,
    Remove,
    NotUndoable,
}

impl Undoable for Counter {
    type Kind = CounterKind;
    /// Value of the counter before the action ran.
    type Args = i64;

    fn kind(&self) -> CounterKind {
        match self {
            Counter::Increment => CounterKind::Increment,
            Counter::Decrement => CounterKind::Decrement,
            Counter::Set(_) => CounterKind::Set,
            Counter::Multiply(_) => CounterKind::Multiply,
            Counter::Add(_) => CounterKind::Add,
            Counter::Remove(_) => CounterKind::Remove,
            Counter::NotUndoable => CounterKind::NotUndoable,
        }
    }
}

pub type CounterState = AppState<i64, Counter>;
pub type CounterStore = Store<i64, Counter>;

pub fn reduce(value: &i64, action: &Counter) -> i64 {
    match action {
        Counter::Increment => value + 1,
        Counter::Decrement => value - 1,
        Counter::Set(n) => *n,
        Counter::Multiply(n) => value * n,
        Counter::Add(n) => value + n,
        Counter::Remove(n) => value - n,
        Counter::NotUndoable => *value,
    }
}

fn restore_previous(_: &Counter, args: Option<&i64>) -> anyhow::Result<Counter> {
    let previous = args
        .copied()
        .ok_or_else(|| anyhow::anyhow!("missing previous value"))?;
    Ok(Counter::Set(previous))
}

fn previous_value(state: &CounterState, _: &Counter) -> anyhow::Result<i64> {
    Ok(state.domain)
}

pub fn reverting() -> RevertingActions<Counter, CounterState> {
    RevertingActions::<Counter, CounterState>::new()
        .with_inverse(CounterKind::Increment, |_, _| Ok(Counter::Decrement))
        .with_inverse(CounterKind::Decrement, |_, _| Ok(Counter::Increment))
        .with_descriptor(
            CounterKind::Set,
            Descriptor::new(restore_previous).create_args(previous_value),
        )
        .with_descriptor(
            CounterKind::Multiply,
            Descriptor::new(restore_previous).create_args(previous_value),
        )
        .with_descriptor(
            CounterKind::Add,
            Descriptor::new(|action: &Counter, _: Option<&i64>| match action {
                Counter::Add(n) => Ok(Counter::Remove(*n)),
                other => anyhow::bail!("expected add, got {other:?}"),
            })
            .group_with_previous(|_, previous: &Counter| matches!(previous, Counter::Add(_))),
        )
        .with_descriptor(
            CounterKind::Remove,
            Descriptor::new(|action: &Counter, _: Option<&i64>| match action {
                Counter::Remove(n) => Ok(Counter::Add(*n)),
                other => anyhow::bail!("expected remove, got {other:?}"),
            })
            .group_with_previous(|_, previous: &Counter| matches!(previous, Counter::Remove(_))),
        )
}

/// A store at zero with the default history limits.
pub fn counter_store() -> CounterStore {
    init_tracing();
    Store::new(0, reduce, reverting())
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
