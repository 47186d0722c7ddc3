use thiserror::Error;

/// Error type for graphmill operations.
#[derive(Debug, Error)]
pub enum GraphMillError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("fault injected: {0}")]
    FaultInjected(String),
    #[error("transaction error: {0}")]
    TransactionError(String),
    #[error("transaction finalization failed: {0}")]
    FinalizationError(String),
    #[error("module error: {0}")]
    ModuleError(String),
}

impl GraphMillError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        GraphMillError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        GraphMillError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        GraphMillError::QueryError(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GraphMillError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        GraphMillError::InvalidInput(msg.into())
    }

    pub fn fault_injection<T: Into<String>>(msg: T) -> Self {
        GraphMillError::FaultInjected(msg.into())
    }

    pub fn transaction<T: Into<String>>(msg: T) -> Self {
        GraphMillError::TransactionError(msg.into())
    }

    pub fn finalization<T: Into<String>>(msg: T) -> Self {
        GraphMillError::FinalizationError(msg.into())
    }

    pub fn module<T: Into<String>>(msg: T) -> Self {
        GraphMillError::ModuleError(msg.into())
    }

    /// True for commit/rollback failures, which bypass every failure policy.
    pub fn is_finalization(&self) -> bool {
        matches!(self, GraphMillError::FinalizationError(_))
    }
}
