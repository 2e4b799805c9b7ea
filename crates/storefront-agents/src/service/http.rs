//! `reqwest` client for the hosted agents REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::AgentService;
use crate::error::ServiceError;
use crate::model::{AgentHandle, CreateAgentRequest};

const LIST_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct HttpServiceConfig {
    /// Project endpoint, e.g. `https://<resource>.services.ai.azure.com/api/projects/<project>`.
    pub endpoint: String,
    pub api_version: String,
    /// Bearer token; requests are sent unauthenticated when absent.
    pub token: Option<String>,
    /// Per-request timeout enforced by the client.
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    data: Vec<AgentHandle>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    last_id: Option<String>,
}

#[derive(Clone)]
pub struct HttpAgentService {
    client: Client,
    base_url: String,
    api_version: String,
    token: Option<String>,
}

impl HttpAgentService {
    pub fn new(config: &HttpServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!("client request id {}", request_id);
        let builder = builder
            .query(&[("api-version", self.api_version.as_str())])
            .header("x-ms-client-request-id", request_id);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let text = Self::check(response).await?.text().await?;
        serde_json::from_str(&text).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AgentService for HttpAgentService {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentHandle, ServiceError> {
        let url = format!("{}/assistants", self.base_url);
        tracing::debug!(
            "POST {} (agent={}, tools={})",
            url,
            request.name,
            request.tools.len()
        );
        let response = self
            .request(self.client.post(&url))
            .json(request)
            .send()
            .await?;
        let handle: AgentHandle = Self::decode(response).await?;
        if handle.id.is_empty() {
            return Err(ServiceError::Decode(
                "agent service returned an empty id".to_string(),
            ));
        }
        Ok(handle)
    }

    async fn list_agents(&self) -> Result<Vec<AgentHandle>, ServiceError> {
        let url = format!("{}/assistants", self.base_url);
        let mut out = Vec::new();
        let mut after: Option<String> = None;
        loop {
            let limit = LIST_PAGE_SIZE.to_string();
            let mut builder = self
                .request(self.client.get(&url))
                .query(&[("limit", limit.as_str())]);
            if let Some(cursor) = after.as_deref() {
                builder = builder.query(&[("after", cursor)]);
            }
            let page: ListPage = Self::decode(builder.send().await?).await?;
            tracing::debug!("listed {} agent(s) (has_more={})", page.data.len(), page.has_more);
            let next = page
                .last_id
                .clone()
                .or_else(|| page.data.last().map(|a| a.id.clone()));
            out.extend(page.data);
            match next {
                Some(cursor) if page.has_more => {
                    if after.as_deref() == Some(cursor.as_str()) {
                        tracing::warn!("list cursor did not advance past {}; stopping", cursor);
                        break;
                    }
                    after = Some(cursor);
                }
                _ => break,
            }
        }
        Ok(out)
    }

    async fn delete_agent(&self, id: &str) -> Result<(), ServiceError> {
        let url = format!("{}/assistants/{}", self.base_url, id);
        tracing::debug!("DELETE {}", url);
        let response = self.request(self.client.delete(&url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
