use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A foreign key supplied by the caller does not resolve to a row.
    #[error("Unknown reference: {entity} with id {id}")]
    UnknownReference { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),
}
