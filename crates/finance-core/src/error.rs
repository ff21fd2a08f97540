use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Category `{name}` is used by {transactions} transaction(s)")]
    CategoryInUse {
        id: Uuid,
        name: String,
        transactions: usize,
    },
    #[error("No match for `{0}`")]
    Unresolved(String),
    #[error("`{0}` matches more than one entry")]
    Ambiguous(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
