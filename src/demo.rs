//! Sequential create/read/update/delete walkthrough
//!
//! Each step runs against one connected client. The first failure aborts the
//! run and names the step; nothing is retried.

use crate::client::PersonClient;
use crate::store::{Person, PersonFields};
use anyhow::{Context, Result};

/// Fields used for the initial create
pub fn initial_person() -> PersonFields {
    PersonFields::new("John Wick", "john.wick@test.com", "123-456-789")
}

/// Fields used for the update
pub fn updated_person() -> PersonFields {
    PersonFields::new("Luke Skywalker", "luke.skywaler@test.com", "083-111-000")
}

/// Responses collected from a completed walkthrough
#[derive(Clone, Debug)]
pub struct DemoReport {
    pub created: Person,
    pub read_back: Person,
    pub update_status: String,
    pub delete_status: String,
}

/// Create, read, update and delete one record
pub async fn run_demo(client: &PersonClient) -> Result<DemoReport> {
    tracing::info!("Creating a new person...");
    let created = client
        .create(initial_person())
        .await
        .context("Error during Create")?;
    tracing::info!("Person created: {:?}", created);

    tracing::info!("Reading the person by ID...");
    let read_back = client
        .read(created.id)
        .await
        .context("Error during Read")?;
    tracing::info!("Person details: {:?}", read_back);

    tracing::info!("Updating the person's details...");
    let update_status = client
        .update(created.id, updated_person())
        .await
        .context("Error during Update")?;
    tracing::info!("Update response: {}", update_status);

    tracing::info!("Deleting the person by ID...");
    let delete_status = client
        .delete(created.id)
        .await
        .context("Error during Delete")?;
    tracing::info!("Delete response: {}", delete_status);

    Ok(DemoReport {
        created,
        read_back,
        update_status,
        delete_status,
    })
}
