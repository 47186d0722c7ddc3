//! Single-transaction execution around a callback.

use crate::{
    errors::GraphMillError,
    fault_injection::{self, FaultPoint},
    store::GraphStore,
    tx::policy::FailurePolicy,
};

/// Executes callbacks in the context of one store transaction each.
///
/// Commit on normal return, rollback on error. The transaction is finalized on
/// every exit path; a failed COMMIT or ROLLBACK surfaces as
/// [`GraphMillError::FinalizationError`] and is never suppressed, since store
/// consistency can no longer be assumed past that point.
pub struct TransactionRunner<'a> {
    store: &'a GraphStore,
}

impl<'a> TransactionRunner<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Run `callback` inside a fresh transaction and propagate its error
    /// unchanged after rolling back.
    pub fn execute_in_transaction<T, F>(&self, callback: F) -> Result<T, GraphMillError>
    where
        F: FnOnce(&GraphStore) -> Result<T, GraphMillError>,
    {
        self.store.begin_transaction()?;
        let outcome = callback(self.store)
            .and_then(|value| {
                fault_injection::check_fault(FaultPoint::SingleTxBeforeCommit)?;
                Ok(value)
            });
        match outcome {
            Ok(value) => {
                self.store.commit_transaction()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.store.rollback_transaction() {
                    tracing::error!(cause = %err, "rollback failed after callback error");
                    return Err(rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Like [`Self::execute_in_transaction`], but callback failures are routed
    /// through `policy`. A suppressed failure yields `Ok(None)` in place of
    /// the callback's value. Finalization failures bypass the policy.
    pub fn execute_with_policy<T, F>(
        &self,
        callback: F,
        policy: &mut dyn FailurePolicy,
    ) -> Result<Option<T>, GraphMillError>
    where
        F: FnOnce(&GraphStore) -> Result<T, GraphMillError>,
    {
        match self.execute_in_transaction(callback) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_finalization() => Err(err),
            Err(err) => {
                policy.on_failure(0, err)?;
                Ok(None)
            }
        }
    }
}
