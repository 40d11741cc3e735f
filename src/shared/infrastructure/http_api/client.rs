use crate::shared::infrastructure::http_api::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

/// JSON over HTTP against one base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Client(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&self.url(path)).map_err(|err| ApiError::Client(format!("{}: {err}", self.url(path))))
    }

    /// `resource` followed by `id` as a single percent-encoded path segment.
    pub fn item_endpoint(&self, resource: &str, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(resource)?;
        let display = url.to_string();
        url.path_segments_mut()
            .map_err(|()| ApiError::Client(format!("{display} cannot take path segments")))?
            .push(id);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.request(method, url).json(body);
        let response = self.send(request).await?;
        decode(response).await
    }

    /// Succeeds on any 2xx status and ignores the body.
    pub async fn delete(&self, url: Url) -> Result<(), ApiError> {
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "request rejected by server");
        Err(ApiError::server(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
            body,
        ))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(classify_transport_error)?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(err.to_string()))
}

fn classify_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Client(err.to_string())
    } else if err.is_decode() {
        ApiError::Parse(err.to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}
