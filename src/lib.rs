pub mod client;
pub mod demo;
pub mod error;
pub mod protocol;
pub mod server;
pub mod store;

// Generated PersonService stubs plus the wire messages they carry
pub mod pb {
    pub use crate::protocol::{
        CreatePersonRequest, PersonProfileResponse, SinglePersonRequest, SuccessResponse,
        UpdatePersonRequest,
    };

    include!(concat!(env!("OUT_DIR"), "/person.PersonService.rs"));
}

pub use client::PersonClient;
pub use error::StoreError;
pub use server::PersonServer;
pub use store::{Person, PersonFields, PersonId, PersonStore};
