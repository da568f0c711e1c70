use crate::{
    ConnectionConfig, Error, TonicConnection,
    proto::{
        Envelope,
        directory_server::{Directory, DirectoryServer},
    },
};
use bytes::Bytes;
use core::time::Duration;
use gridid::{
    AllocatedJobId, ClientConfig, CrossClusterJobId, Diagnostics, GridClient, MessageType,
    PROTOCOL_VERSION, RequestEnvelope, ResponseEnvelope, ScalarResponse, TransportError,
};
use std::error::Error as _;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Code, Request, Response, Status, transport::Server};

/// Hands out ids `1..=last_id`, then the zero sentinel. Owner index is
/// `id % 3`.
struct FakeDirectory {
    next_id: AtomicU32,
    last_id: u32,
    table: Bytes,
}

impl FakeDirectory {
    fn new(last_id: u32) -> Self {
        Self {
            next_id: AtomicU32::new(1),
            last_id,
            table: Bytes::from_static(b"cluster-a,cluster-b,cluster-c"),
        }
    }
}

#[tonic::async_trait]
impl Directory for FakeDirectory {
    async fn exchange(&self, req: Request<Envelope>) -> Result<Response<Envelope>, Status> {
        let req = RequestEnvelope::try_from(req.into_inner())
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        if req.protocol_version != PROTOCOL_VERSION {
            return Err(Status::failed_precondition(format!(
                "unsupported protocol version {}",
                req.protocol_version
            )));
        }

        let resp = match req.msg_type {
            MessageType::ClusterTableRequest => {
                ResponseEnvelope::new(MessageType::ClusterTable, self.table.clone())
            }
            MessageType::JobIdRequest => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let id = if id > self.last_id { 0 } else { id };
                ResponseEnvelope::new(MessageType::JobId, id.to_le_bytes().to_vec())
            }
            MessageType::JobOwnerRequest => {
                let AllocatedJobId(id) = AllocatedJobId::decode(&req.payload)
                    .map_err(|e| Status::invalid_argument(e.to_string()))?;
                let index = (id.to_raw() % 3) as i32;
                ResponseEnvelope::new(MessageType::JobOwner, index.to_le_bytes().to_vec())
            }
            other => return Err(Status::unimplemented(format!("{other} is not a request"))),
        };
        Ok(Response::new(resp.into()))
    }
}

/// A directory served on an ephemeral local port for the lifetime of the
/// value.
struct RunningDirectory {
    endpoint: String,
    _runtime: Runtime,
}

fn spawn_directory(directory: FakeDirectory) -> RunningDirectory {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(
        Server::builder()
            .add_service(DirectoryServer::new(directory))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    RunningDirectory {
        endpoint: format!("http://{addr}"),
        _runtime: runtime,
    }
}

fn config(endpoint: &str) -> ConnectionConfig {
    ConnectionConfig::new(endpoint)
        .with_timeout(Duration::from_secs(5))
        .with_connect_timeout(Duration::from_secs(5))
}

/// An endpoint nothing is listening on.
fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn allocates_until_directory_is_exhausted() {
    let directory = spawn_directory(FakeDirectory::new(2));
    let mut conn = TonicConnection::connect(&config(&directory.endpoint)).unwrap();
    let client = GridClient::new(ClientConfig::default().with_diagnostics(Diagnostics::enabled()));

    assert_eq!(client.allocate_identifier(&mut conn).unwrap().to_raw(), 1);
    assert_eq!(client.allocate_identifier(&mut conn).unwrap().to_raw(), 2);

    let err = client.allocate_identifier(&mut conn).unwrap_err();
    assert!(err.source().is_none());
}

#[test]
fn resolves_owner_including_index_zero() {
    let directory = spawn_directory(FakeDirectory::new(10));
    let mut conn = TonicConnection::connect(&config(&directory.endpoint)).unwrap();
    let client = GridClient::new(ClientConfig::default());

    let idx = client
        .resolve_owner(&mut conn, CrossClusterJobId::from_raw(42))
        .unwrap();
    assert_eq!(idx.to_raw(), 0);
    let idx = client
        .resolve_owner(&mut conn, CrossClusterJobId::from_raw(43))
        .unwrap();
    assert_eq!(idx.to_raw(), 1);
}

#[test]
fn refresh_delivers_table_to_sink() {
    let directory = spawn_directory(FakeDirectory::new(10));
    let mut conn = TonicConnection::connect(&config(&directory.endpoint)).unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let received = Arc::clone(&received);
        move |table: Bytes| received.lock().unwrap().push(table)
    };
    let client = GridClient::with_sink(ClientConfig::default(), sink);

    client.refresh_cluster_table(&mut conn).unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(&received[0][..], b"cluster-a,cluster-b,cluster-c");
}

#[test]
fn rejected_protocol_version_is_a_transport_error() {
    let directory = spawn_directory(FakeDirectory::new(10));
    let mut conn = TonicConnection::connect(&config(&directory.endpoint)).unwrap();
    let client = GridClient::new(ClientConfig::default().with_protocol_version(PROTOCOL_VERSION + 1));

    let err = client
        .resolve_owner(&mut conn, CrossClusterJobId::from_raw(1))
        .unwrap_err();
    assert!(matches!(
        err,
        TransportError::Rejected { code, .. } if code == Code::FailedPrecondition as i32
    ));
    assert!(client.refresh_cluster_table(&mut conn).is_err());
    assert!(client.allocate_identifier(&mut conn).is_err());
}

#[test]
fn lazy_connection_to_dead_endpoint_fails_per_call() {
    let mut conn = TonicConnection::connect_lazy(
        &config(&dead_endpoint()).with_connect_timeout(Duration::from_secs(1)),
    )
    .unwrap();
    let client = GridClient::new(ClientConfig::default());

    let err = client.allocate_identifier(&mut conn).unwrap_err();
    assert!(
        err.source()
            .and_then(|s| s.downcast_ref::<TransportError>())
            .is_some()
    );

    assert!(
        client
            .resolve_owner(&mut conn, CrossClusterJobId::from_raw(1))
            .is_err()
    );
    assert!(client.refresh_cluster_table(&mut conn).is_err());
}

#[test]
fn eager_connection_to_dead_endpoint_fails() {
    let err = TonicConnection::connect(
        &config(&dead_endpoint()).with_connect_timeout(Duration::from_secs(1)),
    )
    .err()
    .expect("no directory is listening");
    assert!(matches!(err, Error::Connect(_)));
}

#[test]
fn malformed_endpoint_is_rejected_before_connecting() {
    let err = TonicConnection::connect_lazy(&ConnectionConfig::new("not a uri"))
        .err()
        .expect("endpoint should not parse");
    assert!(matches!(err, Error::InvalidEndpoint { .. }));
}
