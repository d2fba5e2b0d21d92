use super::{CollectionRepository, CredentialProvider, SingletonRepository};
use crate::config::Config;
use crate::error::Result;
use crate::models::{AboutSection, Entity, FooterConfig, HomeSection, SidebarConfig};
use crate::ConsoleError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// Application-level success code inside the response envelope.
const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Value,
}

/// JSON client for the blog API. Every response is wrapped as
/// `{code, msg, data}`; callers only ever see `data`.
pub struct RestClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl RestClient {
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConsoleError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(RestClient {
            client,
            base_url: config.api_root(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.credentials.bearer_token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| {
            warn!("Request failed to reach the server: {}", e);
            ConsoleError::Request("Network error".to_string())
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConsoleError::Request(format!("Failed to read response: {}", e)))?;
        unwrap_envelope(status, &body)
    }
}

/// Maps an HTTP response onto the envelope payload or a request error.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message = match status {
            StatusCode::UNAUTHORIZED => "Not signed in or session expired",
            StatusCode::FORBIDDEN => "Permission denied",
            StatusCode::NOT_FOUND => "Requested resource does not exist",
            StatusCode::INTERNAL_SERVER_ERROR => "Server error",
            _ => "Network error",
        };
        warn!("API responded with {}", status);
        return Err(ConsoleError::Request(message.to_string()));
    }

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ConsoleError::Request(format!("Malformed response: {}", e)))?;
    if envelope.code != SUCCESS_CODE {
        let message = envelope
            .msg
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| "Request failed".to_string());
        warn!("API rejected the request ({}): {}", envelope.code, message);
        return Err(ConsoleError::Request(message));
    }

    serde_json::from_value(envelope.data)
        .map_err(|e| ConsoleError::Request(format!("Unexpected response payload: {}", e)))
}

/// A REST collection such as `/home/sections`.
pub struct HttpCollection<T> {
    client: Arc<RestClient>,
    path: String,
    reorder_path: Option<String>,
    status_endpoint: bool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> HttpCollection<T> {
    pub fn new(client: Arc<RestClient>, path: impl Into<String>) -> Self {
        HttpCollection {
            client,
            path: path.into(),
            reorder_path: None,
            status_endpoint: false,
            _entity: PhantomData,
        }
    }

    /// Enables batch ordering via `PUT {path}` with the ordered id list.
    pub fn with_reorder(mut self, path: impl Into<String>) -> Self {
        self.reorder_path = Some(path.into());
        self
    }

    /// Toggles visibility through `PUT {collection}/{id}/status`.
    pub fn with_status_endpoint(mut self) -> Self {
        self.status_endpoint = true;
        self
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.path, id)
    }
}

impl HttpCollection<HomeSection> {
    pub fn home_sections(client: Arc<RestClient>) -> Self {
        Self::new(client, "/home/sections")
    }
}

impl HttpCollection<AboutSection> {
    pub fn about_sections(client: Arc<RestClient>) -> Self {
        Self::new(client, "/about/sections")
            .with_reorder("/about/sections/order")
            .with_status_endpoint()
    }
}

#[derive(Serialize)]
struct StatusBody {
    enabled: bool,
}

#[async_trait]
impl<T: Entity> CollectionRepository<T> for HttpCollection<T> {
    async fn list_all(&self) -> Result<Vec<T>> {
        self.client.get(&self.path).await
    }

    async fn get_one(&self, id: i64) -> Result<T> {
        self.client.get(&self.item_path(id)).await
    }

    async fn create(&self, entity: &T) -> Result<T> {
        self.client.post(&self.path, entity).await
    }

    async fn update(&self, id: i64, patch: &T::Patch) -> Result<T> {
        self.client.put(&self.item_path(id), patch).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: Value = self.client.delete(&self.item_path(id)).await?;
        Ok(())
    }

    fn supports_reorder(&self) -> bool {
        self.reorder_path.is_some()
    }

    async fn reorder(&self, ids: &[i64]) -> Result<()> {
        let Some(path) = &self.reorder_path else {
            return Err(ConsoleError::Unsupported(format!("{} has no reorder endpoint", self.path)));
        };
        let _: Value = self.client.put(path, ids).await?;
        Ok(())
    }

    async fn set_enabled(&self, id: i64, enabled: bool) -> Result<()> {
        if self.status_endpoint {
            let path = format!("{}/status", self.item_path(id));
            let _: Value = self.client.put(&path, &StatusBody { enabled }).await?;
        } else {
            let patch = T::enabled_patch(enabled);
            let _: T = self.client.put(&self.item_path(id), &patch).await?;
        }
        Ok(())
    }
}

/// A configuration document at a fixed path, e.g. `/home/sidebar/config`.
pub struct HttpSingleton<T> {
    client: Arc<RestClient>,
    path: String,
    _document: PhantomData<fn() -> T>,
}

impl<T> HttpSingleton<T> {
    pub fn new(client: Arc<RestClient>, path: impl Into<String>) -> Self {
        HttpSingleton {
            client,
            path: path.into(),
            _document: PhantomData,
        }
    }
}

impl HttpSingleton<SidebarConfig> {
    pub fn sidebar(client: Arc<RestClient>) -> Self {
        Self::new(client, "/home/sidebar/config")
    }
}

impl HttpSingleton<FooterConfig> {
    pub fn footer(client: Arc<RestClient>) -> Self {
        Self::new(client, "/footer/profile/config")
    }
}

#[async_trait]
impl<T> SingletonRepository<T> for HttpSingleton<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch(&self) -> Result<T> {
        self.client.get(&self.path).await
    }

    async fn store(&self, value: &T) -> Result<T> {
        self.client.put(&self.path, value).await
    }
}
