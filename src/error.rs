//! Error types for the person store and their RPC mapping

use crate::protocol::{status_with_text, FIELDS_MISSING_TEXT, NOT_FOUND_TEXT};
use crate::store::PersonId;
use thiserror::Error;
use tonic::{Code, Status};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required text field is empty
    #[error("fields missing")]
    Validation,

    /// No record at this identifier
    #[error("not found")]
    NotFound(PersonId),

    /// The identifier counter cannot advance past `PersonId::MAX`
    #[error("identifiers exhausted")]
    IdsExhausted,
}

impl From<StoreError> for Status {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation => Status::new(Code::InvalidArgument, err.to_string()),
            StoreError::NotFound(_) => Status::new(Code::NotFound, err.to_string()),
            StoreError::IdsExhausted => Status::new(Code::ResourceExhausted, err.to_string()),
        }
    }
}

impl StoreError {
    /// Failure status for update/delete, with the status text in its details
    pub fn into_status_with_text(self) -> Status {
        match self {
            StoreError::Validation => {
                status_with_text(Code::InvalidArgument, self.to_string(), FIELDS_MISSING_TEXT)
            }
            StoreError::NotFound(_) => {
                status_with_text(Code::NotFound, self.to_string(), NOT_FOUND_TEXT)
            }
            StoreError::IdsExhausted => self.into(),
        }
    }
}
