use crate::shared::infrastructure::connectors::in_memory::InMemoryConnector;
use crate::shell::bootstrap::{Bootstrap, Phase};
use crate::shell::route_groups::{RouteGroup, RouteGroups};
use crate::tests::fixtures::app_config::AppConfigBuilder;
use axum::{Json, Router, routing::post};
use std::fs;
use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn send(addr: SocketAddr, raw: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}

fn get(path: &str, extra_headers: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n{extra_headers}Connection: close\r\n\r\n")
}

#[tokio::test]
async fn serves_the_whole_surface_over_tcp_until_shutdown() {
    let images = TempDir::new().unwrap();
    fs::write(images.path().join("doc1.png"), b"doctor-one").unwrap();

    let config = AppConfigBuilder::new()
        .host("127.0.0.1")
        .port(0)
        .allowed_origins(&["http://localhost:5173"])
        .static_dir(images.path())
        .json_body_limit(64)
        .build();
    let mut bootstrap = Bootstrap::new(
        config,
        InMemoryConnector::new("database"),
        InMemoryConnector::new("media-host"),
    );
    let routes = RouteGroups::new().with(
        RouteGroup::User,
        Router::new().route(
            "/register",
            post(|Json(body): Json<serde_json::Value>| async move { Json(body) }),
        ),
    );

    let running = bootstrap.start(routes).await.expect("start failed");
    assert_eq!(bootstrap.phase(), Phase::Serving);
    let addr = running.local_addr();

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(running.serve(async {
        stopped.await.ok();
    }));

    let liveness = send(addr, get("/", "")).await;
    assert!(liveness.starts_with("HTTP/1.1 200"), "{liveness}");
    assert!(liveness.ends_with("API Working Successfully!"), "{liveness}");

    let image = send(addr, get("/images/doc1.png", "")).await;
    assert!(image.starts_with("HTTP/1.1 200"), "{image}");
    assert!(image.ends_with("doctor-one"), "{image}");

    let missing = send(addr, get("/images/nope.png", "")).await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

    let allowed = send(addr, get("/", "Origin: http://localhost:5173\r\n")).await;
    assert!(
        allowed
            .to_ascii_lowercase()
            .contains("access-control-allow-origin: http://localhost:5173"),
        "{allowed}"
    );

    let denied = send(addr, get("/", "Origin: https://elsewhere.example\r\n")).await;
    assert!(
        !denied
            .to_ascii_lowercase()
            .contains("access-control-allow-origin"),
        "{denied}"
    );

    let body = r#"{"name":"Jane"}"#;
    let registered = send(
        addr,
        format!(
            "POST /api/user/register HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;
    assert!(registered.starts_with("HTTP/1.1 200"), "{registered}");
    assert!(registered.ends_with(body), "{registered}");

    let oversized = "x".repeat(128);
    let rejected = send(
        addr,
        format!(
            "POST /api/user/register HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n\"{oversized}\"",
            oversized.len() + 2
        ),
    )
    .await;
    assert!(rejected.starts_with("HTTP/1.1 413"), "{rejected}");

    let unwired = send(addr, get("/api/payment/verify", "")).await;
    assert!(unwired.starts_with("HTTP/1.1 501"), "{unwired}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn never_binds_when_the_database_is_unreachable() {
    let mut database = InMemoryConnector::new(());
    database.toggle_offline();
    let mut bootstrap = Bootstrap::new(
        AppConfigBuilder::new().host("127.0.0.1").port(0).build(),
        database,
        InMemoryConnector::new(()),
    );

    let result = bootstrap.start(RouteGroups::new()).await;

    assert!(result.is_err());
    assert_eq!(bootstrap.phase(), Phase::Terminated);
}
