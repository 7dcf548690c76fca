//! Wire messages for the `person.PersonService` RPC surface
//!
//! These are prost messages written by hand; the service stubs that carry
//! them are generated by build.rs.

use crate::store::{Person, PersonFields};
use bytes::Bytes;
use prost::Message;
use tonic::{Code, Status};

/// Status text returned by a successful update
pub const UPDATE_DONE: &str = "Done!";
/// Status text returned by a successful delete
pub const DELETE_DONE: &str = "Delete!";
/// Status text attached to a NOT_FOUND failure
pub const NOT_FOUND_TEXT: &str = "Not found!";
/// Status text attached to an INVALID_ARGUMENT failure
pub const FIELDS_MISSING_TEXT: &str = "fields missing!";

#[derive(Clone, PartialEq, Message)]
pub struct CreatePersonRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub phone_number: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct SinglePersonRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct UpdatePersonRequest {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub phone_number: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct PersonProfileResponse {
    #[prost(int32, tag = "1")]
    pub id: i32,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    #[prost(string, tag = "4")]
    pub phone_number: String,
}

/// Textual outcome of an update or delete
#[derive(Clone, PartialEq, Message)]
pub struct SuccessResponse {
    #[prost(string, tag = "1")]
    pub response: String,
}

impl SuccessResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Build a failure status that still carries a `SuccessResponse` payload
/// in its details, so the caller sees both the error and the text.
pub fn status_with_text(code: Code, message: impl Into<String>, text: &str) -> Status {
    let details = Bytes::from(SuccessResponse::new(text).encode_to_vec());
    Status::with_details(code, message, details)
}

/// Recover the status text carried by a failed update or delete, if any
pub fn status_text(status: &Status) -> Option<String> {
    if status.details().is_empty() {
        return None;
    }
    SuccessResponse::decode(status.details())
        .ok()
        .map(|r| r.response)
}

// Conversion helpers between our types and the wire messages
impl From<CreatePersonRequest> for PersonFields {
    fn from(req: CreatePersonRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
        }
    }
}

impl From<PersonFields> for CreatePersonRequest {
    fn from(fields: PersonFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            phone_number: fields.phone_number,
        }
    }
}

impl UpdatePersonRequest {
    pub fn new(id: i32, fields: PersonFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone_number: fields.phone_number,
        }
    }

    /// Split into the target id and the replacement fields
    pub fn into_parts(self) -> (i32, PersonFields) {
        (
            self.id,
            PersonFields {
                name: self.name,
                email: self.email,
                phone_number: self.phone_number,
            },
        )
    }
}

impl From<Person> for PersonProfileResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            email: person.email,
            phone_number: person.phone_number,
        }
    }
}

impl From<PersonProfileResponse> for Person {
    fn from(resp: PersonProfileResponse) -> Self {
        Self {
            id: resp.id,
            name: resp.name,
            email: resp.email,
            phone_number: resp.phone_number,
        }
    }
}
