use graphmill::{Direction, GraphEdge, GraphMillError, GraphNode, GraphStore, TransactionRunner};
use serde_json::json;

fn store() -> GraphStore {
    GraphStore::open_in_memory().expect("store")
}

fn node(name: &str) -> GraphNode {
    GraphNode {
        id: 0,
        kind: "Person".into(),
        name: name.into(),
        data: json!({}),
    }
}

fn edge(from: i64, to: i64, edge_type: &str) -> GraphEdge {
    GraphEdge {
        id: 0,
        from_id: from,
        to_id: to,
        edge_type: edge_type.into(),
        data: json!({}),
    }
}

#[test]
fn test_insert_and_get_node() {
    let store = store();
    let id = store.insert_node(&node("alice")).unwrap();
    let fetched = store.get_node(id).unwrap();
    assert_eq!(fetched.name, "alice");
    assert_eq!(fetched.kind, "Person");
    assert!(store.node_exists(id).unwrap());
}

#[test]
fn test_get_missing_node_is_not_found() {
    let store = store();
    let err = store.get_node(999).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(!store.node_exists(999).unwrap());
}

#[test]
fn test_edge_endpoints_must_exist() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    let err = store.insert_edge(&edge(a, a + 100, "KNOWS")).unwrap_err();
    assert!(err.to_string().contains("must reference existing nodes"));
}

#[test]
fn test_edges_of_respects_direction() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    let b = store.insert_node(&node("b")).unwrap();
    store.insert_edge(&edge(a, b, "KNOWS")).unwrap();

    let out = store.edges_of(a, Direction::Outgoing).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].to_id, b);

    assert!(store.edges_of(a, Direction::Incoming).unwrap().is_empty());
    assert_eq!(store.edges_of(b, Direction::Incoming).unwrap().len(), 1);
    assert_eq!(store.edges_of(a, Direction::Both).unwrap().len(), 1);
}

#[test]
fn test_edges_of_both_deduplicates_self_loops() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    store.insert_edge(&edge(a, a, "SELF")).unwrap();
    let both = store.edges_of(a, Direction::Both).unwrap();
    assert_eq!(both.len(), 1);
}

#[test]
fn test_delete_node_removes_edges_and_properties() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    let b = store.insert_node(&node("b")).unwrap();
    store.insert_edge(&edge(a, b, "KNOWS")).unwrap();
    store.set_node_property(a, "visits", &json!(3)).unwrap();

    store.delete_node(a).unwrap();

    assert!(!store.node_exists(a).unwrap());
    assert!(store.edges_of(b, Direction::Incoming).unwrap().is_empty());
    assert_eq!(store.node_count().unwrap(), 1);
}

#[test]
fn test_absent_property_reads_as_none() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    assert_eq!(store.node_property(a, "visits").unwrap(), None);
    assert_eq!(store.node_property_i64(a, "visits").unwrap(), None);
}

#[test]
fn test_set_property_upserts() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    store.set_node_property(a, "visits", &json!(1)).unwrap();
    store.set_node_property(a, "visits", &json!(2)).unwrap();
    assert_eq!(store.node_property_i64(a, "visits").unwrap(), Some(2));
}

#[test]
fn test_set_property_on_missing_node_errors() {
    let store = store();
    let err = store.set_node_property(42, "visits", &json!(1)).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_all_node_ids_is_ordered() {
    let store = store();
    let ids: Vec<i64> = (0..5)
        .map(|i| store.insert_node(&node(&format!("n{i}"))).unwrap())
        .collect();
    assert_eq!(store.all_node_ids().unwrap(), ids);
    assert_eq!(store.node_count().unwrap(), 5);
}

#[test]
fn test_adjacency_cache_counts_hits_and_misses() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    let b = store.insert_node(&node("b")).unwrap();
    store.insert_edge(&edge(a, b, "KNOWS")).unwrap();

    let before = store.outgoing_cache_ref().stats();
    store.edges_of(a, Direction::Outgoing).unwrap();
    store.edges_of(a, Direction::Outgoing).unwrap();
    let after = store.outgoing_cache_ref().stats();
    assert!(after.misses > before.misses);
    assert!(after.hits > before.hits);
}

#[test]
fn test_rollback_evicts_uncommitted_edges_from_the_cache() {
    let store = store();
    let a = store.insert_node(&node("a")).unwrap();
    let b = store.insert_node(&node("b")).unwrap();

    let runner = TransactionRunner::new(&store);
    let err = runner
        .execute_in_transaction(|store| {
            store.insert_edge(&edge(a, b, "KNOWS"))?;
            // Reading inside the transaction caches the uncommitted edge.
            assert_eq!(store.edges_of(a, Direction::Outgoing)?.len(), 1);
            Err::<(), _>(GraphMillError::invalid_input("abort"))
        })
        .unwrap_err();
    assert!(err.to_string().contains("abort"));

    // The rollback must not leave the phantom edge served from cache.
    assert!(store.edges_of(a, Direction::Outgoing).unwrap().is_empty());
    assert!(store.edges_of(b, Direction::Incoming).unwrap().is_empty());
}

#[test]
fn test_fresh_store_reports_current_schema_version() {
    let store = store();
    assert_eq!(
        store.schema_version().unwrap(),
        graphmill::schema::SCHEMA_VERSION
    );
}

#[test]
fn test_file_backed_store_persists_across_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("graph.db");
    let id = {
        let store = GraphStore::open(&path).unwrap();
        store.insert_node(&node("durable")).unwrap()
    };
    let store = GraphStore::open(&path).unwrap();
    assert_eq!(store.get_node(id).unwrap().name, "durable");
}
