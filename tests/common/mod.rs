//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use switchyard::app::{App, Input};
use switchyard::config::AppConfig;
use switchyard::http::HttpServer;
use switchyard::lifecycle::Shutdown;
use switchyard::routing::{Handler, Resolution};

/// Route `method path` with no input.
#[allow(dead_code)]
pub fn request(app: &App, method: &str, path: &str) -> Resolution {
    app.handle(method, path, &Input::default()).unwrap()
}

/// The reply text of a settled resolution.
#[allow(dead_code)]
pub fn reply_text(resolution: Resolution) -> String {
    match resolution {
        Resolution::Reply(reply) => reply.to_string(),
        other => panic!("expected a reply, got {:?}", other),
    }
}

/// An inline handler returning fixed text.
#[allow(dead_code)]
pub fn text(reply: &'static str) -> Handler {
    Handler::inline(move |_| Ok(reply.into()))
}

/// The catch-all used throughout the scenarios.
#[allow(dead_code)]
pub fn not_found() -> Handler {
    Handler::inline(|call| {
        Ok(format!("Oops, 404! \"{}\" does not exist.", call.arg(0).unwrap_or_default()).into())
    })
}

/// Serve `app` on an ephemeral local port.
#[allow(dead_code)]
pub async fn start_server(config: AppConfig, app: App) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(config, Arc::new(app));
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}
