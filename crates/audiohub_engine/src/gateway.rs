use audiohub_core::{DownloadSpec, FileEntry, SearchResult};
use audiohub_logging::{hub_debug, hub_warn, TARGET_GATEWAY};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::wire::{
    decode_reply, DeleteBody, DeleteReply, FilesReply, SearchBody, SearchReply, SubmitBody,
    SubmitReply, SuggestReply,
};
use crate::{FailureKind, GatewayError};

pub const SEARCH_PATH: &str = "/api/search";
pub const SUGGESTIONS_PATH: &str = "/api/suggestions";
pub const DOWNLOAD_PATH: &str = "/api/download";
pub const FILES_PATH: &str = "/api/files";
pub const DELETE_PATH: &str = "/api/cleanup";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Page origin, e.g. `http://127.0.0.1:8000`.
    pub base_url: Url,
    pub user_agent: String,
}

impl GatewaySettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            user_agent: concat!("audiohub/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Request/response calls against the backend. No retries: every failure is
/// returned to the caller as is.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, GatewayError>;

    /// Returns the server's task reference on acceptance.
    async fn submit_download(&self, spec: &DownloadSpec) -> Result<String, GatewayError>;

    async fn list_files(&self) -> Result<Vec<FileEntry>, GatewayError>;

    async fn delete_file(&self, name: &str) -> Result<(), GatewayError>;

    async fn suggest(&self, query: &str) -> Result<Vec<String>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        hub_debug!(target: TARGET_GATEWAY, "POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        hub_debug!(target: TARGET_GATEWAY, "GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(response).await
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, GatewayError> {
        let reply: SearchReply = self
            .post(SEARCH_PATH, &SearchBody { query, max_results })
            .await?;
        Ok(reply.results)
    }

    async fn submit_download(&self, spec: &DownloadSpec) -> Result<String, GatewayError> {
        let reply: SubmitReply = self.post(DOWNLOAD_PATH, &SubmitBody::from(spec)).await?;
        Ok(reply.task_id)
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>, GatewayError> {
        let reply: FilesReply = self.get(self.endpoint(FILES_PATH)?).await?;
        Ok(reply.files)
    }

    async fn delete_file(&self, name: &str) -> Result<(), GatewayError> {
        let reply: DeleteReply = self
            .post(DELETE_PATH, &DeleteBody { filename: name })
            .await?;
        match reply.success {
            Some(false) => Err(GatewayError::new(
                FailureKind::Rejected,
                format!("could not delete \"{name}\""),
            )),
            _ => Ok(()),
        }
    }

    async fn suggest(&self, query: &str) -> Result<Vec<String>, GatewayError> {
        let mut url = self.endpoint(SUGGESTIONS_PATH)?;
        url.query_pairs_mut().append_pair("q", query);
        let reply: SuggestReply = self.get(url).await?;
        Ok(reply.suggestions)
    }
}

async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    let reply = decode_reply(status.as_u16(), &body);
    if let Err(err) = &reply {
        hub_warn!(target: TARGET_GATEWAY, "request failed ({}): {}", err.kind, err.message);
    }
    reply
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_decode() {
        return GatewayError::new(FailureKind::Decode, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
