//! Batched transaction execution.
//!
//! Work items are pulled lazily from an input source and applied in
//! consecutive groups of `batch_size`, each group wrapped in exactly one
//! transaction. A failing item abandons its whole group (the transaction
//! rolls back), previously committed groups stand, and execution resumes with
//! the next group according to the configured [`FailurePolicy`].

use crate::{
    errors::GraphMillError,
    fault_injection::{self, FaultPoint},
    store::GraphStore,
    tx::{
        policy::{FailurePolicy, Rethrow},
        single::TransactionRunner,
    },
};

/// One discrete operation applied to the store, parameterized by one input
/// item. Closures of the matching shape implement this directly.
pub trait UnitOfWork<T> {
    fn execute(&mut self, store: &GraphStore, input: T) -> Result<(), GraphMillError>;
}

impl<T, F> UnitOfWork<T> for F
where
    F: FnMut(&GraphStore, T) -> Result<(), GraphMillError>,
{
    fn execute(&mut self, store: &GraphStore, input: T) -> Result<(), GraphMillError> {
        self(store, input)
    }
}

/// Input marker for units of work that take no per-item input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullItem;

/// Input source synthesized from a step count.
pub type StepSource = std::iter::Take<std::iter::Repeat<NullItem>>;

/// Outcome of a single batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub index: usize,
    pub items: usize,
    pub committed: bool,
    pub error: Option<String>,
}

/// Aggregated outcome of an [`BatchExecutor::execute`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
    pub items_committed: usize,
}

impl BatchReport {
    pub fn batches_committed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.committed).count()
    }

    pub fn batches_failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.committed).count()
    }
}

/// Drives an input source through the store in fixed-size transactional
/// batches.
///
/// Batches are strictly sequential: batch N is fully finalized before batch
/// N+1 begins, so later batches may depend on graph state committed by
/// earlier ones. The executor keeps no cross-batch state beyond its position
/// in the input source.
pub struct BatchExecutor<'a, I, U>
where
    I: Iterator,
    U: UnitOfWork<I::Item>,
{
    store: &'a GraphStore,
    batch_size: usize,
    source: I,
    work: U,
    stop_when: Option<Box<dyn Fn() -> bool + 'a>>,
}

impl<I, U> std::fmt::Debug for BatchExecutor<'_, I, U>
where
    I: Iterator,
    U: UnitOfWork<I::Item>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchExecutor")
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl<'a, I, U> BatchExecutor<'a, I, U>
where
    I: Iterator,
    U: UnitOfWork<I::Item>,
{
    /// Executor driven by an explicit input source, consumed lazily.
    pub fn new<S>(
        store: &'a GraphStore,
        batch_size: usize,
        source: S,
        work: U,
    ) -> Result<Self, GraphMillError>
    where
        S: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        if batch_size == 0 {
            return Err(GraphMillError::invalid_input("batch size must be >= 1"));
        }
        Ok(Self {
            store,
            batch_size,
            source: source.into_iter(),
            work,
            stop_when: None,
        })
    }

    /// Cooperative cancellation: `predicate` is evaluated before each new
    /// batch starts, never mid-batch.
    pub fn stop_when(mut self, predicate: impl Fn() -> bool + 'a) -> Self {
        self.stop_when = Some(Box::new(predicate));
        self
    }

    /// Process the whole input with the default [`Rethrow`] policy: the first
    /// failed batch aborts the run, committed batches stand.
    pub fn execute(&mut self) -> Result<BatchReport, GraphMillError> {
        let mut policy = Rethrow;
        self.execute_with_policy(&mut policy)
    }

    /// Process the whole input, consulting `policy` after every failed batch.
    pub fn execute_with_policy(
        &mut self,
        policy: &mut dyn FailurePolicy,
    ) -> Result<BatchReport, GraphMillError> {
        let mut report = BatchReport::default();
        loop {
            if let Some(stop) = &self.stop_when
                && stop()
            {
                tracing::debug!(
                    batches = report.outcomes.len(),
                    "stop requested at batch boundary"
                );
                break;
            }
            let mut group = Vec::with_capacity(self.batch_size);
            while group.len() < self.batch_size {
                match self.source.next() {
                    Some(item) => group.push(item),
                    None => break,
                }
            }
            if group.is_empty() {
                break;
            }
            let index = report.outcomes.len();
            let items = group.len();
            let work = &mut self.work;
            let runner = TransactionRunner::new(self.store);
            let result = runner.execute_in_transaction(move |store| {
                for item in group {
                    work.execute(store, item)?;
                }
                fault_injection::check_fault(FaultPoint::BatchBeforeCommit)
            });
            match result {
                Ok(()) => {
                    report.outcomes.push(BatchOutcome {
                        index,
                        items,
                        committed: true,
                        error: None,
                    });
                    report.items_committed += items;
                }
                Err(err) if err.is_finalization() => return Err(err),
                Err(err) => {
                    report.outcomes.push(BatchOutcome {
                        index,
                        items,
                        committed: false,
                        error: Some(err.to_string()),
                    });
                    policy.on_failure(index, err)?;
                }
            }
        }
        Ok(report)
    }
}

impl<'a, U> BatchExecutor<'a, StepSource, U>
where
    U: UnitOfWork<NullItem>,
{
    /// Executor driven by a total step count with a no-input unit of work;
    /// each step synthesizes a [`NullItem`].
    pub fn with_steps(
        store: &'a GraphStore,
        batch_size: usize,
        steps: usize,
        work: U,
    ) -> Result<Self, GraphMillError> {
        Self::new(
            store,
            batch_size,
            std::iter::repeat(NullItem).take(steps),
            work,
        )
    }
}
