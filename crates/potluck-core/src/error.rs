use thiserror::Error;

pub type Result<T> = std::result::Result<T, PotluckError>;

#[derive(Debug, Error)]
pub enum PotluckError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Storage operation error: {0}")]
    StorageOperation(#[from] redb::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Recipe store is empty")]
    EmptyStore,

    #[error("No recipe with id <= {0}")]
    NoRecipeAtOrBelow(u32),

    #[error("Malformed interaction payload: {0}")]
    MalformedPayload(String),

    #[error("Slack API call failed: {0}")]
    PlatformCall(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
