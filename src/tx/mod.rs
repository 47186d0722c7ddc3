//! Transaction execution.
//!
//! [`single`] runs one callback inside one transaction boundary with
//! commit-on-success / rollback-on-failure semantics. [`batch`] drives a
//! stream of work items through that boundary in fixed-size groups, each
//! group committing or rolling back as a unit. [`policy`] decides what a
//! failed group means for the rest of the run.

pub mod batch;
pub mod policy;
pub mod single;

pub use batch::{BatchExecutor, BatchOutcome, BatchReport, NullItem, StepSource, UnitOfWork};
pub use policy::{CollectFailures, FailurePolicy, LogAndContinue, Rethrow};
pub use single::TransactionRunner;
