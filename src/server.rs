//! Person RPC server implementation
//!
//! The server owns one [`PersonStore`] behind a mutex and serves the four
//! PersonService operations against it.

use crate::pb::person_service_server::{PersonService, PersonServiceServer};
use crate::protocol::{
    CreatePersonRequest, PersonProfileResponse, SinglePersonRequest, SuccessResponse,
    UpdatePersonRequest, DELETE_DONE, UPDATE_DONE,
};
use crate::store::PersonStore;
use anyhow::Result;
use parking_lot::Mutex;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tonic::{Request, Response, Status};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// gRPC listen address
    pub listen_addr: String,
    /// Upper bound on a single request, on top of any client deadline
    pub request_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            request_timeout: None,
        }
    }
}

/// Person RPC server
pub struct PersonServer {
    config: ServerConfig,
    /// Single guard around the map and the id counter
    store: Arc<Mutex<PersonStore>>,
}

impl PersonServer {
    /// Create a server with an empty store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, PersonStore::new())
    }

    /// Create a server around an existing store
    pub fn with_store(config: ServerConfig, store: PersonStore) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Get the gRPC service for this server
    pub fn into_service(self) -> PersonServiceServer<PersonServiceImpl> {
        PersonServiceServer::new(PersonServiceImpl {
            store: self.store,
        })
    }

    /// Get the listen address
    pub fn listen_addr(&self) -> &str {
        &self.config.listen_addr
    }

    /// Shared handle to the store, for inspection
    pub fn store(&self) -> Arc<Mutex<PersonStore>> {
        Arc::clone(&self.store)
    }
}

/// gRPC service implementation wrapper
pub struct PersonServiceImpl {
    store: Arc<Mutex<PersonStore>>,
}

#[tonic::async_trait]
impl PersonService for PersonServiceImpl {
    async fn create(
        &self,
        request: Request<CreatePersonRequest>,
    ) -> Result<Response<PersonProfileResponse>, Status> {
        let req = request.into_inner();

        tracing::debug!("CREATE request: name={:?}", req.name);

        let mut store = self.store.lock();
        let person = store.insert(req.into()).and_then(|id| store.get(id));
        drop(store);

        match person {
            Ok(person) => {
                tracing::debug!("CREATE success: id={}", person.id);
                Ok(Response::new(person.into()))
            }
            Err(e) => {
                tracing::warn!("CREATE failed: {}", e);
                Err(e.into())
            }
        }
    }

    async fn read(
        &self,
        request: Request<SinglePersonRequest>,
    ) -> Result<Response<PersonProfileResponse>, Status> {
        let id = request.into_inner().id;

        tracing::debug!("READ request: id={}", id);

        let person = self.store.lock().get(id);

        match person {
            Ok(person) => Ok(Response::new(person.into())),
            Err(e) => {
                tracing::warn!("READ failed: id={}, error={}", id, e);
                Err(e.into())
            }
        }
    }

    async fn update(
        &self,
        request: Request<UpdatePersonRequest>,
    ) -> Result<Response<SuccessResponse>, Status> {
        let (id, fields) = request.into_inner().into_parts();

        tracing::debug!("UPDATE request: id={}", id);

        let result = self.store.lock().replace(id, fields);

        match result {
            Ok(()) => {
                tracing::debug!("UPDATE success: id={}", id);
                Ok(Response::new(SuccessResponse::new(UPDATE_DONE)))
            }
            Err(e) => {
                tracing::warn!("UPDATE failed: id={}, error={}", id, e);
                Err(e.into_status_with_text())
            }
        }
    }

    async fn delete(
        &self,
        request: Request<SinglePersonRequest>,
    ) -> Result<Response<SuccessResponse>, Status> {
        let id = request.into_inner().id;

        tracing::debug!("DELETE request: id={}", id);

        let result = self.store.lock().remove(id);

        match result {
            Ok(()) => {
                tracing::debug!("DELETE success: id={}", id);
                Ok(Response::new(SuccessResponse::new(DELETE_DONE)))
            }
            Err(e) => {
                tracing::warn!("DELETE failed: id={}, error={}", id, e);
                Err(e.into_status_with_text())
            }
        }
    }
}

/// Resolves on SIGINT or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run the server until `signal` resolves, then drain in-flight requests
pub async fn run_server_with_shutdown<F>(config: ServerConfig, signal: F) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let addr: SocketAddr = config.listen_addr.parse()?;
    let request_timeout = config.request_timeout;
    let server = PersonServer::new(config);

    tracing::info!("Person server listening at {}", addr);

    let mut builder = tonic::transport::Server::builder();
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .add_service(server.into_service())
        .serve_with_shutdown(addr, async {
            signal.await;
            tracing::info!("server is stopping");
        })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Run the server until interrupted
pub async fn run_server(config: ServerConfig) -> Result<()> {
    run_server_with_shutdown(config, shutdown_signal()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::status_text;
    use tonic::Code;

    fn service() -> PersonServiceImpl {
        PersonServiceImpl {
            store: Arc::new(Mutex::new(PersonStore::new())),
        }
    }

    fn create_req(name: &str, email: &str, phone: &str) -> Request<CreatePersonRequest> {
        Request::new(CreatePersonRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
        })
    }

    #[test]
    fn test_server_creation() {
        let server = PersonServer::new(ServerConfig::default());
        assert_eq!(server.listen_addr(), "0.0.0.0:8080");
        assert!(server.store().lock().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_read() {
        let svc = service();

        let created = svc
            .create(create_req("John Wick", "john.wick@test.com", "123-456-789"))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "John Wick");

        let read = svc
            .read(Request::new(SinglePersonRequest { id: 1 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_create_fields_missing() {
        let svc = service();

        let status = svc
            .create(create_req("John Wick", "", "123-456-789"))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "fields missing");

        let created = svc
            .create(create_req("John Wick", "john.wick@test.com", "123-456-789"))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_read_zero_not_found() {
        let svc = service();
        let status = svc
            .read(Request::new(SinglePersonRequest { id: 0 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "not found");
    }

    #[tokio::test]
    async fn test_update_status_text() {
        let svc = service();

        let status = svc
            .update(Request::new(UpdatePersonRequest {
                id: 9,
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status_text(&status).as_deref(), Some("Not found!"));

        svc.create(create_req("John Wick", "john.wick@test.com", "123-456-789"))
            .await
            .unwrap();

        let status = svc
            .update(Request::new(UpdatePersonRequest {
                id: 1,
                name: "Luke Skywalker".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status_text(&status).as_deref(), Some("fields missing!"));

        let resp = svc
            .update(Request::new(UpdatePersonRequest {
                id: 1,
                name: "Luke Skywalker".to_string(),
                email: "luke.skywaler@test.com".to_string(),
                phone_number: "083-111-000".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.response, "Done!");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let svc = service();
        svc.create(create_req("John Wick", "john.wick@test.com", "123-456-789"))
            .await
            .unwrap();

        let resp = svc
            .delete(Request::new(SinglePersonRequest { id: 1 }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.response, "Delete!");

        let status = svc
            .delete(Request::new(SinglePersonRequest { id: 1 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status_text(&status).as_deref(), Some("Not found!"));
    }
}
