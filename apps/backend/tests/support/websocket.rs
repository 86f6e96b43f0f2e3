// WebSocket test utilities

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use clout_backend::infra::state::build_state;
use clout_backend::middleware::request_trace::RequestTrace;
use clout_backend::middleware::structured_logger::StructuredLogger;
use clout_backend::routes;
use clout_backend::state::app_state::AppState;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// A running server plus the state it serves, so tests can inspect
/// lobby and connection counts directly.
pub struct TestServer {
    pub state: AppState,
    pub addr: std::net::SocketAddr,
    handle: actix_web::dev::ServerHandle,
    join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.join.await;
    }
}

/// Start a real HTTP server on an ephemeral port with a seeded state and
/// the placeholder card catalog.
pub async fn start_test_server(seed: u64) -> TestResult<TestServer> {
    let state = build_state().with_seed(Some(seed)).build();
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer {
        state,
        addr,
        handle,
        join,
    })
}

/// Poll until `probe` returns `expected` or the timeout passes.
pub async fn wait_for<F>(what: &str, expected: usize, timeout: Duration, probe: F) -> TestResult
where
    F: Fn() -> usize,
{
    let start = tokio::time::Instant::now();
    loop {
        let got = probe();
        if got == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!("timeout waiting for {what} == {expected} (got {got})").into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
