use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use algo_otc::testing::SomeTestParams;

pub const STUB_TX_ID: &str = "STUBTXID234234";

/// What the stub node/indexer should serve for this test.
#[derive(Clone)]
pub struct StubBehavior {
    pub applications: Value,
    pub reject_submissions: bool,
    pub fail_indexer: bool,
}

impl StubBehavior {
    pub fn serving(applications: Value) -> Self {
        StubBehavior {
            applications,
            reject_submissions: false,
            fail_indexer: false,
        }
    }
}

/// In-process HTTP stand-in for both the node and the indexer REST APIs.
pub struct StubNetwork {
    pub base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubNetwork {
    pub async fn start(behavior: StubBehavior) -> StubNetwork {
        let behavior = Arc::new(behavior);
        let make_svc = make_service_fn(move |_conn| {
            let behavior = behavior.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request| {
                    let behavior = behavior.clone();
                    async move { Ok::<_, Infallible>(route(request, &behavior)) }
                }))
            }
        });

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(make_svc);
        let local_addr = server.local_addr();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let graceful = server.with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        });
        tokio::spawn(async move {
            if let Err(error) = graceful.await {
                panic!("Stub network server failed - {}", error);
            }
        });

        StubNetwork {
            base_url: format!("http://{}", local_addr),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn shutdown(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}

fn route(request: Request<Body>, behavior: &StubBehavior) -> Response<Body> {
    let path = request.uri().path().to_string();
    match (request.method(), path.as_str()) {
        (&Method::GET, "/v2/transactions/params") => {
            json_response(SomeTestParams::transaction_params_json())
        }
        (&Method::POST, "/v2/transactions") => {
            if behavior.reject_submissions {
                error_response(
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "transaction rejected by stub node" }),
                )
            } else {
                json_response(json!({ "txId": STUB_TX_ID }))
            }
        }
        (&Method::GET, path)
            if path.starts_with("/v2/accounts/") && path.ends_with("/created-applications") =>
        {
            if behavior.fail_indexer {
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "indexer unavailable" }),
                )
            } else {
                json_response(behavior.applications.clone())
            }
        }
        _ => error_response(StatusCode::NOT_FOUND, json!({ "message": "not found" })),
    }
}

fn json_response(value: Value) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn error_response(status: StatusCode, value: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(value.to_string()))
        .unwrap()
}
