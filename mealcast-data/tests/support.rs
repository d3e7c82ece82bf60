//! Local HTTP stub used by the adapter tests.

use std::net::{SocketAddr, TcpListener};
use std::thread;

use axum::Router;

/// Serve `router` on an ephemeral localhost port from a background thread.
///
/// The server lives until the test process exits.
pub fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
        panic!("failed to bind stub server: {err}");
    });
    listener.set_nonblocking(true).unwrap_or_else(|err| {
        panic!("failed to configure stub listener: {err}");
    });
    let addr = local_addr(&listener);

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|err| panic!("failed to build stub runtime: {err}"));
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener)
                .unwrap_or_else(|err| panic!("failed to adopt stub listener: {err}"));
            axum::serve(listener, router)
                .await
                .unwrap_or_else(|err| panic!("stub server failed: {err}"));
        });
    });

    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
        panic!("failed to bind probe listener: {err}");
    });
    let addr = local_addr(&listener);
    drop(listener);
    format!("http://{addr}")
}

fn local_addr(listener: &TcpListener) -> SocketAddr {
    listener
        .local_addr()
        .unwrap_or_else(|err| panic!("failed to read listener address: {err}"))
}
