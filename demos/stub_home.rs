//! demos/stub_home.rs
//! Run: cargo run --example stub_home -- <port> [status]
//!
//! Serves `/home` with a fixed status so the checker can be pointed at it:
//!   cargo run -- --home http://127.0.0.1:8001/home
//! `DELAY_MS` holds every response back; set it above the check timeout to
//! watch a timeout failure.

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    delay_ms: u64,
    req_counter: Arc<AtomicU64>,
}

async fn handle(req: Request<Body>, state: StubState) -> Result<Response<Body>, Infallible> {
    let n = state.req_counter.fetch_add(1, Ordering::SeqCst) + 1;
    println!("#{} {} {}", n, req.method(), req.uri().path());

    if state.delay_ms > 0 {
        sleep(Duration::from_millis(state.delay_ms)).await;
    }

    let response = if req.uri().path() == "/home" {
        Response::builder()
            .status(state.status)
            .header("Content-Type", "text/html")
            .body(Body::from("<h1>Home</h1>"))
    } else {
        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"))
    };

    Ok(response.unwrap_or_else(|_| Response::new(Body::empty())))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "8001".into())
        .parse()?;
    let status = StatusCode::from_u16(
        std::env::args()
            .nth(2)
            .unwrap_or_else(|| "200".into())
            .parse()?,
    )?;
    let delay_ms = std::env::var("DELAY_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let state = StubState {
        status,
        delay_ms,
        req_counter: Arc::new(AtomicU64::new(0)),
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let st = state.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(req, st.clone()))) }
    });

    println!(
        "Stub home page on http://{}/home  [status={} delay={}ms]",
        addr,
        status.as_u16(),
        delay_ms
    );

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
