//! Failure policies for transaction execution.
//!
//! A policy decides what a failed unit of work or batch means for the rest of
//! a run: `Ok(())` suppresses the failure and execution continues, `Err`
//! escalates it and the run aborts. Already-committed batches always stand.

use crate::errors::GraphMillError;

pub trait FailurePolicy {
    fn on_failure(&mut self, batch_index: usize, err: GraphMillError)
    -> Result<(), GraphMillError>;
}

/// Default policy: escalate the failure unchanged, aborting the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rethrow;

impl FailurePolicy for Rethrow {
    fn on_failure(
        &mut self,
        _batch_index: usize,
        err: GraphMillError,
    ) -> Result<(), GraphMillError> {
        Err(err)
    }
}

/// Log the failure and continue with the next batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAndContinue;

impl FailurePolicy for LogAndContinue {
    fn on_failure(
        &mut self,
        batch_index: usize,
        err: GraphMillError,
    ) -> Result<(), GraphMillError> {
        tracing::warn!(batch = batch_index, error = %err, "batch failed, continuing");
        Ok(())
    }
}

/// Record failures per batch index for later inspection without halting.
#[derive(Debug, Default)]
pub struct CollectFailures {
    failures: Vec<(usize, GraphMillError)>,
}

impl CollectFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[(usize, GraphMillError)] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<(usize, GraphMillError)> {
        self.failures
    }
}

impl FailurePolicy for CollectFailures {
    fn on_failure(
        &mut self,
        batch_index: usize,
        err: GraphMillError,
    ) -> Result<(), GraphMillError> {
        self.failures.push((batch_index, err));
        Ok(())
    }
}
