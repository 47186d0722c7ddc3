use std::sync::{Mutex, OnceLock};

use graphmill::{
    BatchExecutor, CollectFailures, GraphMillError, GraphNode, GraphStore, NullItem,
    TransactionRunner,
    fault_injection::{FaultPoint, configure_fault, reset_faults},
};
use serde_json::json;

// The fault registry is process-global; every test in this file serializes on
// the same lock.
fn test_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn create_node(store: &GraphStore, name: &str) -> Result<i64, GraphMillError> {
    store.insert_node(&GraphNode {
        id: 0,
        kind: "Node".into(),
        name: name.into(),
        data: json!({}),
    })
}

#[test]
fn pre_commit_fault_rolls_back_a_successful_callback() {
    let _guard = test_lock().lock().unwrap();
    reset_faults();
    configure_fault(FaultPoint::SingleTxBeforeCommit, 1);

    let store = GraphStore::open_in_memory().unwrap();
    let runner = TransactionRunner::new(&store);
    let err = runner
        .execute_in_transaction(|store| create_node(store, "never lands"))
        .unwrap_err();
    assert!(
        err.to_string().contains("fault injected"),
        "expected fault error, got {err:?}"
    );
    assert_eq!(store.node_count().unwrap(), 0);

    reset_faults();
}

#[test]
fn commit_failure_bypasses_a_suppressing_policy_in_single_tx() {
    let _guard = test_lock().lock().unwrap();
    reset_faults();
    configure_fault(FaultPoint::CommitFailure, 1);

    let store = GraphStore::open_in_memory().unwrap();
    let runner = TransactionRunner::new(&store);
    let mut policy = CollectFailures::new();
    let err = runner
        .execute_with_policy(|store| create_node(store, "lost"), &mut policy)
        .unwrap_err();

    // The policy never sees a finalization failure; the error propagates.
    assert!(err.is_finalization(), "expected finalization error, got {err:?}");
    assert!(policy.failures().is_empty());
    assert_eq!(store.node_count().unwrap(), 0);

    reset_faults();
}

#[test]
fn commit_failure_aborts_the_batch_run_despite_suppressing_policy() {
    let _guard = test_lock().lock().unwrap();
    reset_faults();
    configure_fault(FaultPoint::CommitFailure, 1);

    let store = GraphStore::open_in_memory().unwrap();
    let work = |store: &GraphStore, _: NullItem| -> Result<(), GraphMillError> {
        create_node(store, "n")?;
        Ok(())
    };
    let mut executor = BatchExecutor::with_steps(&store, 3, 9, work).unwrap();
    let mut policy = CollectFailures::new();
    let err = executor.execute_with_policy(&mut policy).unwrap_err();

    // Had the failed commit been routed through the policy, batches 2 and 3
    // would have committed 6 nodes and the failure would be collected.
    assert!(err.is_finalization(), "expected finalization error, got {err:?}");
    assert!(policy.failures().is_empty());
    assert_eq!(store.node_count().unwrap(), 0);

    reset_faults();
}

#[test]
fn batch_pre_commit_fault_destroys_only_the_faulted_batch() {
    let _guard = test_lock().lock().unwrap();
    reset_faults();
    configure_fault(FaultPoint::BatchBeforeCommit, 1);

    let store = GraphStore::open_in_memory().unwrap();
    let work = |store: &GraphStore, _: NullItem| -> Result<(), GraphMillError> {
        create_node(store, "n")?;
        Ok(())
    };
    let mut executor = BatchExecutor::with_steps(&store, 3, 9, work).unwrap();
    let mut policy = CollectFailures::new();
    let report = executor.execute_with_policy(&mut policy).unwrap();

    // First batch hits the fault just before commit and rolls back whole.
    assert_eq!(store.node_count().unwrap(), 6);
    assert_eq!(report.batches_failed(), 1);
    assert_eq!(policy.failures()[0].0, 0);

    reset_faults();
}
