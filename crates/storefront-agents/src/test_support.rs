//! Shared fixtures for unit tests: a recording agent service and a loopback
//! HTTP/1.1 server with canned responses.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::error::ServiceError;
use crate::model::{AgentHandle, CreateAgentRequest};
use crate::service::AgentService;

/// Agent service stub that records every call.
#[derive(Default)]
pub struct RecordingService {
    pub created: Mutex<Vec<CreateAgentRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub existing: Mutex<Vec<AgentHandle>>,
    /// Agent names whose creation fails.
    pub fail_names: HashSet<String>,
    pub fail_list: bool,
}

impl RecordingService {
    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            fail_names: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn created(&self) -> Vec<CreateAgentRequest> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentService for RecordingService {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentHandle, ServiceError> {
        if self.fail_names.contains(&request.name) {
            return Err(ServiceError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        Ok(AgentHandle {
            id: format!("asst_{}", created.len()),
            name: Some(request.name.clone()),
            model: Some(request.model.clone()),
        })
    }

    async fn list_agents(&self) -> Result<Vec<AgentHandle>, ServiceError> {
        if self.fail_list {
            return Err(ServiceError::Decode("list unavailable".to_string()));
        }
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn delete_agent(&self, id: &str) -> Result<(), ServiceError> {
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Bind a loopback server that answers one request per canned response, in
/// order, then stops. Returns the base URL and a receiver of captured requests.
pub async fn mock_server(
    responses: Vec<(u16, String)>,
) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let (read_half, mut write_half) = stream.into_split();
            let mut reader = BufReader::new(read_half);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).await.unwrap();
            let mut parts = request_line.trim().splitn(3, ' ');
            let method = parts.next().unwrap_or("").to_string();
            let path = parts.next().unwrap_or("").to_string();

            let mut headers = HashMap::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).await.unwrap();
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    break;
                }
                if let Some((k, v)) = trimmed.split_once(": ") {
                    let key = k.to_ascii_lowercase();
                    if key == "content-length" {
                        content_length = v.parse().unwrap_or(0);
                    }
                    headers.insert(key, v.to_string());
                }
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).await.unwrap();

            let _ = tx.send(CapturedRequest {
                method,
                path,
                headers,
                body: String::from_utf8_lossy(&body_bytes).into_owned(),
            });

            let resp = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                if status < 400 { "OK" } else { "Error" },
                body.len(),
                body,
            );
            let _ = write_half.write_all(resp.as_bytes()).await;
            let _ = write_half.shutdown().await;
        }
    });

    (format!("http://127.0.0.1:{port}"), rx)
}

/// Bind a server that accepts connections and never answers.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{port}")
}
