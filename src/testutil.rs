//! In-process endpoint fixture for exercising the live fetch path.
//!
//! Binds a real TCP listener, answers a fixed number of connections with
//! canned bodies routed on the `action` query parameter, then stops. Kept
//! deliberately dumb: one read per connection is enough for the small GET
//! requests reqwest sends.

use std::collections::HashMap;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve canned `(status, body)` responses keyed by action for `requests`
/// connections, then stop. Returns the endpoint URL to point a client at.
pub(crate) async fn spawn_endpoint(
    responses: HashMap<&'static str, (u16, String)>,
    requests: usize,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture listener");
    let addr = listener.local_addr().expect("Failed to read fixture addr");

    tokio::spawn(async move {
        for _ in 0..requests {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();

            let (status, body) = responses
                .iter()
                .find(|(action, _)| request.contains(&format!("action={action}")))
                .map(|(_, response)| response.clone())
                .unwrap_or((200, r#"{"success":false,"error":"unknown action"}"#.to_string()));

            let response = format!(
                "HTTP/1.1 {status} Fixture\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len(),
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{addr}/")
}

/// Success envelope carrying a two-student roster.
pub(crate) fn students_envelope() -> String {
    json!({
        "success": true,
        "data": [
            {"carnet": "2024-0001", "nombre": "Paula Ibáñez", "curso": "4to A", "habilitado": true},
            {"carnet": "2024-0002", "nombre": "Rodrigo Paz", "curso": "6to B", "habilitado": false},
        ],
    })
    .to_string()
}

/// Success envelope carrying candidates with the given ids.
pub(crate) fn candidates_envelope(ids: &[i64]) -> String {
    let candidates: Vec<_> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "nombre": format!("Candidata {id}"),
                "sigla": format!("C{id}"),
                "foto": format!("https://placehold.co/200x200?text=C{id}"),
                "propuestas": "Propuestas de ejemplo.",
            })
        })
        .collect();

    json!({"success": true, "data": candidates}).to_string()
}
