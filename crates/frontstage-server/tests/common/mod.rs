//! Shared helpers for server integration tests.

use std::net::TcpListener;

/// Reserve an ephemeral port by binding to port 0 and releasing it.
///
/// There is a small race window between release and reuse; acceptable for
/// tests on loopback.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}
