// floor-client/tests/http_client.rs
// HttpClient against a minimal local HTTP responder

use std::sync::{Arc, Mutex};

use floor_client::{ClientConfig, ClientError, FloorApi, TableLayoutUpdate};
use shared::error::ErrorCode;
use shared::models::TableStatus;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// (method, path, body) of every request received
type Requests = Arc<Mutex<Vec<(String, String, String)>>>;

/// Serves canned responses keyed by request path until the test ends
async fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> (String, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Requests = Arc::default();
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break None;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break Some(pos + 4);
                }
            };
            let Some(header_end) = header_end else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

            let mut parts = head.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let path = parts.next().unwrap_or_default().to_string();
            seen.lock().unwrap().push((method, path.clone(), body));

            let (status, payload) = routes
                .iter()
                .find(|(p, _, _)| *p == path)
                .map(|(_, s, b)| (*s, *b))
                .unwrap_or((404, r#"{"code":3,"message":"Not found"}"#));
            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                payload.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), requests)
}

#[tokio::test]
async fn test_list_floors_unwraps_envelope() {
    let (url, requests) = serve(vec![(
        "/api/floors",
        200,
        r#"{"code":0,"message":"OK","data":[{"id":1,"name":"Indoor","width":1200,"isActive":true},{"id":"f2","name":"Terrace"}]}"#,
    )])
    .await;

    let client = ClientConfig::new(url).with_token("secret").build_http_client().unwrap();
    let floors = client.list_floors().await.unwrap();

    assert_eq!(floors.len(), 2);
    assert_eq!(floors[0].id, "1");
    assert_eq!(floors[0].width, Some(1200.0));
    assert!(floors[1].is_active);
    assert_eq!(requests.lock().unwrap()[0].1, "/api/floors");
}

#[tokio::test]
async fn test_floor_layout_path_and_tokens() {
    let (url, _) = serve(vec![(
        "/api/floors/f1/layout",
        200,
        r#"{"code":0,"data":{"floor":{"width":800,"height":600},"tables":[{"id":"t1","code":"T1","status":2,"layout":{"x":120,"y":80,"shape":"Round"}}]}}"#,
    )])
    .await;

    let client = ClientConfig::new(url).build_http_client().unwrap();
    let layout = client.get_floor_layout("f1").await.unwrap();

    assert_eq!(layout.floor.width, Some(800.0));
    let table = &layout.tables[0];
    assert_eq!(table.status.as_ref().map(|s| s.as_str()), Some("2"));
    assert_eq!(table.layout.as_ref().unwrap().x, Some(120.0));
}

#[tokio::test]
async fn test_error_envelope_surfaces_code() {
    let (url, _) = serve(vec![(
        "/api/tables",
        500,
        r#"{"code":7403,"message":"Layout unavailable"}"#,
    )])
    .await;

    let client = ClientConfig::new(url).build_http_client().unwrap();
    let err = client.list_all_tables().await.unwrap_err();

    match err {
        ClientError::Api(app) => {
            assert_eq!(app.code, ErrorCode::FloorLayoutUnavailable);
            assert_eq!(app.message, "Layout unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data_is_invalid_response() {
    let (url, _) = serve(vec![("/api/floors", 200, r#"{"code":0,"message":"OK"}"#)]).await;

    let client = ClientConfig::new(url).build_http_client().unwrap();
    let err = client.list_floors().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)), "{err:?}");
}

#[tokio::test]
async fn test_save_table_layout_sends_persisted_status() {
    let (url, requests) = serve(vec![("/api/tables/t1/layout", 200, r#"{"code":0,"message":"OK"}"#)]).await;

    let client = ClientConfig::new(url).build_http_client().unwrap();
    let update = TableLayoutUpdate {
        x: 120.0,
        y: 100.0,
        width: 80.0,
        height: 80.0,
        shape: "Circle".into(),
        rotation: 0.0,
        status: TableStatus::Reserved,
    };
    client.save_table_layout("t1", &update).await.unwrap();

    let requests = requests.lock().unwrap();
    let (method, path, body) = &requests[0];
    assert_eq!(method, "PUT");
    assert_eq!(path, "/api/tables/t1/layout");
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["x"], 120.0);
    assert_eq!(sent["status"], "RESERVED");
}
