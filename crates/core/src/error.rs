use crate::types::PartyId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: PartyId },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid directory source: {0}")]
    InvalidSource(String),
}
