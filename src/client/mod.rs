pub mod dto;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ConsoleConfig;
use crate::error::{ApiError, ConsoleError};
use crate::models::{Entity, Timetable};
use crate::toast::{ToastKind, Toaster};

const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

/// Raw status and body text as returned by the remote API.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Moves one JSON request to the remote API and back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, ApiError>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConsoleError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<TransportResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Typed access to the remote timetable API.
///
/// Every failure is logged and raised as an error toast before it is returned,
/// so callers only need to stop what they were doing.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    toaster: Toaster,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, toaster: Toaster) -> Self {
        Self { transport, toaster }
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        match self.try_request(path, method.clone(), body).await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("API error on {} {}: {}", method, path, e);
                self.toaster.notify(e.to_string(), ToastKind::Error);
                Err(e)
            }
        }
    }

    async fn try_request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        debug!("{} {}", method, path);
        let response = self.transport.send(method, path, body).await?;

        if !response.status.is_success() {
            let message = if response.body.trim().is_empty() {
                FALLBACK_ERROR_MESSAGE.to_string()
            } else {
                response.body
            };
            return Err(ApiError::Http {
                status: response.status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, ApiError> {
        self.request(&E::KIND.collection_path(), Method::GET, None).await
    }

    pub async fn create<E: Entity>(&self, new: &E::New) -> Result<E, ApiError> {
        let body = match serde_json::to_value(new) {
            Ok(body) => body,
            Err(e) => {
                let e = ApiError::from(e);
                self.toaster.notify(e.to_string(), ToastKind::Error);
                return Err(e);
            }
        };
        self.request(&E::KIND.collection_path(), Method::POST, Some(body))
            .await
    }

    pub async fn generate(&self) -> Result<dto::GenerateResponse, ApiError> {
        self.request("/generate/", Method::POST, None).await
    }

    pub async fn timetable(&self, id: i64) -> Result<Timetable, ApiError> {
        self.request(&format!("/timetables/{}", id), Method::GET, None)
            .await
    }

    pub async fn timetables(&self) -> Result<Vec<Timetable>, ApiError> {
        self.request("/timetables/", Method::GET, None).await
    }

    pub async fn latest_timetable(&self) -> Result<Timetable, ApiError> {
        self.request("/timetables/latest", Method::GET, None).await
    }
}
