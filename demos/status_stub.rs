//! demos/status_stub.rs
//! In-memory stub of the status-check API, for exercising the probe locally.
//! Run: cargo run --example status_stub -- <port> [jitter_ms]
//! Then: STATUSPROBE_BASE_URL=http://127.0.0.1:<port> cargo run

use hyper::{
    header,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, Server, StatusCode,
};
use rand::Rng;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::sleep;

#[derive(Clone)]
struct StubState {
    records: Arc<Mutex<Vec<serde_json::Value>>>,
    jitter_ms: u64,
}

// ——————————————————————————————————————————
// Request handler
async fn handle(req: Request<Body>, state: StubState) -> Result<Response<Body>, Infallible> {
    // Simulate backend latency
    if state.jitter_ms > 0 {
        let delay = rand::thread_rng().gen_range(0..=state.jitter_ms);
        sleep(Duration::from_millis(delay)).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    if method == Method::GET && path == "/api/" {
        return Ok(json_response(
            StatusCode::OK,
            serde_json::json!({ "message": "status API ready" }).to_string(),
        ));
    }

    if method == Method::GET && path == "/api/status" {
        let records = state.records.lock().unwrap().clone();
        return Ok(json_response(
            StatusCode::OK,
            serde_json::Value::Array(records).to_string(),
        ));
    }

    if method == Method::POST && path == "/api/status" {
        let body = hyper::body::to_bytes(req.into_body())
            .await
            .unwrap_or_default();
        let response = match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(payload) if payload.get("client_name").and_then(|v| v.as_str()).is_some() => {
                let record = serde_json::json!({
                    "id": uuid::Uuid::new_v4().to_string(),
                    "client_name": payload["client_name"],
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                });
                state.records.lock().unwrap().push(record.clone());
                json_response(StatusCode::OK, record.to_string())
            }
            _ => json_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "detail": "client_name is required" }).to_string(),
            ),
        };
        return Ok(response);
    }

    if method == Method::OPTIONS && path == "/api/status" {
        return Ok(Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::empty())
            .unwrap());
    }

    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(Body::from("Not Found"))
        .unwrap())
}

fn json_response(status: StatusCode, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::main]
async fn main() {
    let port: u16 = std::env::args()
        .nth(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let jitter_ms: u64 = std::env::args()
        .nth(2)
        .and_then(|j| j.parse().ok())
        .unwrap_or(0);

    let state = StubState {
        records: Arc::new(Mutex::new(Vec::new())),
        jitter_ms,
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let make_svc = make_service_fn(move |_| {
        let state = state.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(req, state.clone()))) }
    });

    println!("status stub listening on http://{}/api/", addr);
    if let Err(err) = Server::bind(&addr).serve(make_svc).await {
        eprintln!("stub server error: {}", err);
    }
}
