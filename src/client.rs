//! Person RPC client implementation
//!
//! A thin wrapper over the generated PersonService client. RPC failures are
//! returned as `anyhow::Error` wrapping the original [`tonic::Status`], so
//! callers can downcast to inspect the code.

use crate::pb::person_service_client::PersonServiceClient;
use crate::protocol::{CreatePersonRequest, SinglePersonRequest, UpdatePersonRequest};
use crate::store::{Person, PersonFields, PersonId};
use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Server address (gRPC endpoint)
    pub server_addr: String,
    /// Timeout for establishing the connection
    pub connect_timeout: Duration,
    /// Deadline attached to every request, if any
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "http://127.0.0.1:8080".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Some(Duration::from_secs(15)),
        }
    }
}

/// Person RPC client
pub struct PersonClient {
    config: ClientConfig,
    grpc_client: Mutex<Option<PersonServiceClient<Channel>>>,
}

impl PersonClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            grpc_client: Mutex::new(None),
        }
    }

    /// Connect to the server
    pub async fn connect(&self) -> Result<()> {
        tracing::info!("Connecting to server at {}", self.config.server_addr);

        let mut endpoint = Endpoint::from_shared(self.config.server_addr.clone())?
            .connect_timeout(self.config.connect_timeout);
        if let Some(timeout) = self.config.request_timeout {
            endpoint = endpoint.timeout(timeout);
        }
        let channel = endpoint.connect().await?;

        *self.grpc_client.lock() = Some(PersonServiceClient::new(channel));

        Ok(())
    }

    fn grpc(&self) -> Result<PersonServiceClient<Channel>> {
        self.grpc_client
            .lock()
            .clone()
            .ok_or_else(|| anyhow!("Not connected"))
    }

    /// Wrap a message with the configured deadline, sent as `grpc-timeout`
    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        if let Some(timeout) = self.config.request_timeout {
            request.set_timeout(timeout);
        }
        request
    }

    /// Create a record, returning it with its assigned id
    pub async fn create(&self, fields: PersonFields) -> Result<Person> {
        let mut client = self.grpc()?;

        let response = client
            .create(self.request(CreatePersonRequest::from(fields)))
            .await?
            .into_inner();

        Ok(response.into())
    }

    /// Read the record at `id`
    pub async fn read(&self, id: PersonId) -> Result<Person> {
        let mut client = self.grpc()?;

        let response = client
            .read(self.request(SinglePersonRequest { id }))
            .await?
            .into_inner();

        Ok(response.into())
    }

    /// Overwrite the record at `id`, returning the server's status text
    pub async fn update(&self, id: PersonId, fields: PersonFields) -> Result<String> {
        let mut client = self.grpc()?;

        let response = client
            .update(self.request(UpdatePersonRequest::new(id, fields)))
            .await?
            .into_inner();

        Ok(response.response)
    }

    /// Delete the record at `id`, returning the server's status text
    pub async fn delete(&self, id: PersonId) -> Result<String> {
        let mut client = self.grpc()?;

        let response = client
            .delete(self.request(SinglePersonRequest { id }))
            .await?
            .into_inner();

        Ok(response.response)
    }

    /// Check if connected to server
    pub fn is_connected(&self) -> bool {
        self.grpc_client.lock().is_some()
    }
}

/// The RPC status behind a client error, if the failure came from the server
pub fn rpc_status(err: &anyhow::Error) -> Option<&Status> {
    err.downcast_ref::<Status>()
}
