//! Core GraphStore struct, construction and transaction plumbing.

use std::path::Path;

use rusqlite::Connection;

use crate::{
    cache::AdjacencyCache,
    errors::GraphMillError,
    fault_injection::{self, FaultPoint},
    schema::ensure_schema,
};

/// Embedded SQLite-backed graph store.
///
/// Owns the connection for the lifetime of the process and hands out
/// adjacency, property and CRUD operations. All mutation inside a transaction
/// goes through [`crate::tx::TransactionRunner`].
pub struct GraphStore {
    pub(crate) conn: Connection,
    pub(crate) outgoing_cache: AdjacencyCache,
    pub(crate) incoming_cache: AdjacencyCache,
}

// In-memory databases report an empty file path in the database list.
fn is_in_memory_connection(conn: &Connection) -> bool {
    match conn.pragma_query_value(None, "database_list", |row| {
        let file: String = row.get(2)?;
        Ok(file)
    }) {
        Ok(file) => file.is_empty() || file == ":memory:",
        Err(_) => true,
    }
}

impl GraphStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GraphMillError> {
        let conn =
            Connection::open(path).map_err(|e| GraphMillError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, GraphMillError> {
        let conn =
            Connection::open_in_memory().map_err(|e| GraphMillError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn schema_version(&self) -> Result<i64, GraphMillError> {
        crate::schema::read_schema_version(&self.conn)
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn invalidate_caches(&self) {
        self.outgoing_cache.clear();
        self.incoming_cache.clear();
    }

    pub fn outgoing_cache_ref(&self) -> &AdjacencyCache {
        &self.outgoing_cache
    }

    pub fn incoming_cache_ref(&self) -> &AdjacencyCache {
        &self.incoming_cache
    }

    /// Open a transaction. IMMEDIATE mode takes the write lock up front, which
    /// keeps batch writers from deadlocking against deferred readers.
    pub(crate) fn begin_transaction(&self) -> Result<(), GraphMillError> {
        self.conn
            .execute("BEGIN IMMEDIATE", [])
            .map(|_| ())
            .map_err(|e| GraphMillError::transaction(e.to_string()))
    }

    pub(crate) fn commit_transaction(&self) -> Result<(), GraphMillError> {
        if let Err(fault) = fault_injection::check_fault(FaultPoint::CommitFailure) {
            // A failed commit aborts the transaction; the injected variant
            // does the same so the connection is usable afterwards.
            let _ = self.conn.execute("ROLLBACK", []);
            self.invalidate_caches();
            return Err(GraphMillError::finalization(fault.to_string()));
        }
        self.conn
            .execute("COMMIT", [])
            .map_err(|e| GraphMillError::finalization(e.to_string()))?;
        self.invalidate_caches();
        Ok(())
    }

    /// Cache entries may hold reads of uncommitted state, so a rollback
    /// invalidates just like a commit does.
    pub(crate) fn rollback_transaction(&self) -> Result<(), GraphMillError> {
        self.conn
            .execute("ROLLBACK", [])
            .map_err(|e| GraphMillError::finalization(e.to_string()))?;
        self.invalidate_caches();
        Ok(())
    }

    fn from_connection(conn: Connection) -> Self {
        conn.set_prepared_statement_cache_capacity(128);

        if !is_in_memory_connection(&conn) {
            // WAL for concurrency, DELETE as the network-filesystem fallback
            if conn.pragma_update(None, "journal_mode", "WAL").is_err() {
                let _ = conn.pragma_update(None, "journal_mode", "DELETE");
            }
            let _ = conn.pragma_update(None, "synchronous", "NORMAL");
            let _ = conn.pragma_update(None, "temp_store", "MEMORY");
        }

        Self {
            conn,
            outgoing_cache: AdjacencyCache::new(),
            incoming_cache: AdjacencyCache::new(),
        }
    }
}
