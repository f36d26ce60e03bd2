//! Integration tests for the embedded server lifecycle.
//!
//! Start the server against real tempdir content roots, fetch over HTTP,
//! and verify the port is released on stop.

mod common;

use common::free_port;
use frontstage_core::{AdditionalContext, ServerConfig, ServerError, ServerHandle, ServerManager};
use frontstage_server::{check_http_ready, wait_for_http_ready, HttpServerManager};
use std::fs;
use tempfile::TempDir;

/// Project layout with an index page and a lib directory.
fn project_with_lib() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "<html>hello</html>").unwrap();

    let lib = dir.path().join("src/main/lib");
    fs::create_dir_all(&lib).unwrap();
    fs::write(lib.join("util.js"), "export const x = 1;").unwrap();

    (dir, lib)
}

#[tokio::test]
async fn serves_basedir_and_additional_contexts() {
    let (dir, lib) = project_with_lib();
    let port = free_port();

    let config = ServerConfig::new(dir.path())
        .with_port(port)
        .with_contexts(vec![AdditionalContext::new("lib", &lib)]);
    let manager = HttpServerManager::new(config);

    let handle = manager.start().await.unwrap();
    assert!(manager.is_running(&handle).await);

    let base = format!("http://127.0.0.1:{}", handle.port);
    let index = reqwest::get(format!("{base}/index.html"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(index, "<html>hello</html>");

    let util = reqwest::get(format!("{base}/lib/util.js"))
        .await
        .unwrap();
    assert!(util.status().is_success());
    assert_eq!(util.text().await.unwrap(), "export const x = 1;");

    manager.stop(&handle).await.unwrap();
    assert!(!manager.is_running(&handle).await);
}

#[tokio::test]
async fn resource_roots_resolve_behind_the_root_mount() {
    let dir = TempDir::new().unwrap();
    let vendor = TempDir::new().unwrap();
    fs::write(vendor.path().join("vendor.js"), "// vendored").unwrap();

    let port = free_port();
    let config = ServerConfig::new(dir.path())
        .with_port(port)
        .with_artifacts(vec![vendor.path().to_path_buf()]);
    let manager = HttpServerManager::new(config);

    let handle = manager.start().await.unwrap();

    let url = format!("http://127.0.0.1:{}/vendor.js", handle.port);
    let body = reqwest::get(url).await.unwrap().text().await.unwrap();
    assert_eq!(body, "// vendored");

    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn directory_requests_resolve_index_html_by_default() {
    let (dir, _lib) = project_with_lib();
    let manager = HttpServerManager::new(ServerConfig::new(dir.path()).with_port(free_port()));

    let handle = manager.start().await.unwrap();

    let root = reqwest::get(format!("http://127.0.0.1:{}/", handle.port))
        .await
        .unwrap();
    assert!(root.status().is_success());
    assert_eq!(root.text().await.unwrap(), "<html>hello</html>");

    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn index_false_disables_index_html_resolution() {
    let (dir, _lib) = project_with_lib();
    let config = ServerConfig::new(dir.path())
        .with_port(free_port())
        .with_property("index", "false");
    let manager = HttpServerManager::new(config);

    let handle = manager.start().await.unwrap();
    let base = format!("http://127.0.0.1:{}", handle.port);

    // Directory requests no longer resolve to index.html
    let root = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(root.status(), reqwest::StatusCode::NOT_FOUND);

    // The file itself is still served when named explicitly
    let explicit = reqwest::get(format!("{base}/index.html")).await.unwrap();
    assert!(explicit.status().is_success());

    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn cors_all_answers_with_allow_origin() {
    let (dir, _lib) = project_with_lib();
    let config = ServerConfig::new(dir.path())
        .with_port(free_port())
        .with_property("cors", "all");
    let manager = HttpServerManager::new(config);

    let handle = manager.start().await.unwrap();

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/index.html", handle.port))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );

    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn precompressed_gzip_serves_the_sidecar_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.js"), "plain body").unwrap();
    fs::write(dir.path().join("app.js.gz"), b"gzipped bytes").unwrap();

    let config = ServerConfig::new(dir.path())
        .with_port(free_port())
        .with_property("precompressed", "gzip");
    let manager = HttpServerManager::new(config);

    let handle = manager.start().await.unwrap();

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/app.js", handle.port))
        .header("Accept-Encoding", "gzip")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("content-encoding")
            .map(|v| v.to_str().unwrap()),
        Some("gzip")
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"gzipped bytes");

    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn start_then_stop_leaves_the_port_free() {
    let dir = TempDir::new().unwrap();
    let port = free_port();

    let manager = HttpServerManager::new(ServerConfig::new(dir.path()).with_port(port));
    let handle = manager.start().await.unwrap();
    manager.stop(&handle).await.unwrap();

    // Rebinding must succeed once the server is down
    std::net::TcpListener::bind(("127.0.0.1", port)).unwrap();
}

#[tokio::test]
async fn bound_port_surfaces_as_start_failure() {
    let dir = TempDir::new().unwrap();
    let blocker = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = blocker.local_addr().unwrap().port();

    let manager = HttpServerManager::new(ServerConfig::new(dir.path()).with_port(port));
    let err = manager.start().await.unwrap_err();
    assert!(matches!(err, ServerError::PortInUse(p) if p == port));
}

#[tokio::test]
async fn unknown_context_provider_fails_before_binding() {
    let dir = TempDir::new().unwrap();
    let manager = HttpServerManager::new(
        ServerConfig::new(dir.path())
            .with_port(free_port())
            .with_context_provider("jetty"),
    );

    let err = manager.start().await.unwrap_err();
    assert!(matches!(err, ServerError::Configuration(_)));
}

#[tokio::test]
async fn stop_rejects_a_foreign_handle() {
    let dir = TempDir::new().unwrap();
    let manager = HttpServerManager::new(ServerConfig::new(dir.path()).with_port(free_port()));

    let handle = manager.start().await.unwrap();

    let foreign = ServerHandle::new(1);
    let err = manager.stop(&foreign).await.unwrap_err();
    assert!(matches!(err, ServerError::NotRunning(_)));

    // The real handle still stops the server
    manager.stop(&handle).await.unwrap();
}

#[tokio::test]
async fn readiness_probe_answers_after_start() {
    let dir = TempDir::new().unwrap();
    let manager = HttpServerManager::new(ServerConfig::new(dir.path()).with_port(free_port()));

    let handle = manager.start().await.unwrap();
    assert!(check_http_ready(handle.port).await.unwrap());
    wait_for_http_ready(handle.port, 2).await.unwrap();

    manager.stop(&handle).await.unwrap();

    // A single probe against the freed port reports not ready
    assert!(!check_http_ready(handle.port).await.unwrap());
}
