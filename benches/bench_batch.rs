//! Batched node-creation throughput across batch sizes.
//!
//! Measures how much per-transaction overhead the batch executor amortizes as
//! the batch size grows, using the criterion benchmarking framework.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphmill::{BatchExecutor, GraphMillError, GraphNode, GraphStore, NullItem};
use tempfile::TempDir;

const STEPS: usize = 500;
const BATCH_SIZES: &[usize] = &[1, 10, 100];
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn batched_node_creation(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("batched_node_creation");
    group.measurement_time(MEASURE);
    group.warm_up_time(WARM_UP);

    for &batch_size in BATCH_SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    let temp_dir = TempDir::new().expect("temp dir");
                    let store =
                        GraphStore::open(temp_dir.path().join("bench.db")).expect("store");
                    let work = |store: &GraphStore, _: NullItem| -> Result<(), GraphMillError> {
                        store.insert_node(&GraphNode {
                            id: 0,
                            kind: "Node".into(),
                            name: "bench".into(),
                            data: serde_json::json!({}),
                        })?;
                        Ok(())
                    };
                    let mut executor = BatchExecutor::with_steps(&store, batch_size, STEPS, work)
                        .expect("executor");
                    executor.execute().expect("execute");
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, batched_node_creation);
criterion_main!(benches);
