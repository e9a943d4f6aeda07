//! WebSocket integration tests against a live server.
//!
//! Run with: `cargo test -p fxsimd --test ws_stream`

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use fxsimd::{Config, Daemon};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay long enough for the server-side subscription of a freshly opened
/// connection to register before another channel starts publishing.
const SETTLE: Duration = Duration::from_millis(200);

async fn start_server() -> SocketAddr {
    let daemon = Daemon::new_in_memory(Config::test());
    daemon
        .start_api_server()
        .await
        .expect("API server must start")
}

async fn connect(addr: SocketAddr) -> WsClient {
    let (socket, _) = connect_async(format!("ws://{}/ws", addr))
        .await
        .expect("WebSocket connect");
    socket
}

/// Receive the next text frame as JSON, skipping ping/pong.
async fn recv_json(socket: &mut WsClient) -> Value {
    loop {
        let frame = timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("timed out waiting for frame")
            .expect("connection closed")
            .expect("frame error");
        match frame {
            Message::Text(text) => return serde_json::from_str(&text).expect("valid JSON frame"),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

/// Collect one full lifecycle (three events) for a single order.
async fn recv_lifecycle(socket: &mut WsClient) -> Vec<Value> {
    let mut events = Vec::with_capacity(3);
    for _ in 0..3 {
        events.push(recv_json(socket).await);
    }
    events
}

#[tokio::test]
async fn test_order_walks_full_lifecycle() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    client
        .send(Message::Text(
            json!({"stocks": "EURUSD", "quantity": 100}).to_string(),
        ))
        .await
        .unwrap();

    let events = recv_lifecycle(&mut client).await;

    let statuses: Vec<&str> = events
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["pending", "executed", "cancelled"]);

    // Every event carries the full snapshot of the same order
    for event in &events {
        assert_eq!(event["id"], events[0]["id"]);
        assert_eq!(event["stocks"], json!("EURUSD"));
        assert_eq!(event["quantity"], json!(100.0));
    }

    // Nothing follows the terminal status
    let extra = timeout(Duration::from_millis(300), client.next()).await;
    assert!(extra.is_err(), "expected silence after cancelled");
}

#[tokio::test]
async fn test_all_clients_receive_identical_streams() {
    let addr = start_server().await;
    let mut sender = connect(addr).await;
    let mut watcher_a = connect(addr).await;
    let mut watcher_b = connect(addr).await;
    tokio::time::sleep(SETTLE).await;

    sender
        .send(Message::Text(
            json!({"stocks": "EURPLN", "quantity": 2.5}).to_string(),
        ))
        .await
        .unwrap();

    let seen_by_sender = recv_lifecycle(&mut sender).await;
    let seen_by_a = recv_lifecycle(&mut watcher_a).await;
    let seen_by_b = recv_lifecycle(&mut watcher_b).await;

    assert_eq!(seen_by_sender, seen_by_a);
    assert_eq!(seen_by_sender, seen_by_b);
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    client
        .send(Message::Text(json!({"stocks": "EURPLN"}).to_string()))
        .await
        .unwrap();

    let reply = recv_json(&mut client).await;
    assert_eq!(reply["error"], json!("Validation error"));
    assert_eq!(reply["code"], json!(1003));
    let message = reply["message"].as_str().unwrap();
    assert!(message.contains("body.quantity"));
    assert!(message.contains("Field required"));
    assert!(message.contains("type=missing"));

    // The connection survives and a valid submission still works
    client
        .send(Message::Text(
            json!({"stocks": "EURPLN", "quantity": 1}).to_string(),
        ))
        .await
        .unwrap();

    let events = recv_lifecycle(&mut client).await;
    assert_eq!(events[0]["status"], json!("pending"));
    assert_eq!(events[2]["status"], json!("cancelled"));
}

#[tokio::test]
async fn test_non_json_frame_reports_decode_error() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    client
        .send(Message::Text("not json at all".to_string()))
        .await
        .unwrap();

    let reply = recv_json(&mut client).await;
    assert_eq!(reply["error"], json!("Validation error"));
    assert_eq!(reply["code"], json!(1003));
    assert!(reply["message"]
        .as_str()
        .unwrap()
        .contains("JSON decode error"));
}

#[tokio::test]
async fn test_http_order_reaches_ws_subscribers() {
    let addr = start_server().await;
    let mut watcher = connect(addr).await;
    tokio::time::sleep(SETTLE).await;

    let placed: Value = reqwest::Client::new()
        .post(format!("http://{}/orders", addr))
        .json(&json!({"stocks": "USDPLN", "quantity": 300}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let events = recv_lifecycle(&mut watcher).await;
    for event in &events {
        assert_eq!(event["id"], placed["id"]);
        assert_eq!(event["stocks"], json!("USDPLN"));
    }
    let statuses: Vec<&str> = events
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["pending", "executed", "cancelled"]);
}

#[tokio::test]
async fn test_late_subscriber_sees_no_history() {
    let addr = start_server().await;
    let mut first = connect(addr).await;

    first
        .send(Message::Text(
            json!({"stocks": "EURUSD", "quantity": 5}).to_string(),
        ))
        .await
        .unwrap();
    let _ = recv_lifecycle(&mut first).await;

    // Connecting after the lifecycle completed yields nothing
    let mut late = connect(addr).await;
    let extra = timeout(Duration::from_millis(300), late.next()).await;
    assert!(extra.is_err(), "late subscriber must not replay history");
}
