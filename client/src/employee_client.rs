use anyhow::Result;
use log::debug;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::client_api::{
    ApiEnvelope, Employee, EmployeeApi, EmployeeId, EmployeeUpdate, HealthStatus, NewEmployee,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Error type for the employee client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("server rejected the request ({status}): {message}")]
    Api { status: StatusCode, message: String },
    #[error("server returned a malformed response ({status})")]
    MalformedResponse { status: StatusCode },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Message reported by the server, if the server produced one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// HTTP implementation of [`EmployeeApi`].
pub struct HttpEmployeeClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpEmployeeClient {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and unwraps the envelope. A 404 becomes `Ok(None)`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} answered 404", response.url());
            return Ok(None);
        }
        let envelope = response.json::<ApiEnvelope<T>>().await.map_err(|e| {
            debug!("undecodable body with status {}: {}", status, e);
            ClientError::MalformedResponse { status }
        })?;
        debug!("{} success={}", status, envelope.success);
        match envelope {
            ApiEnvelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(Some(data)),
            ApiEnvelope {
                success: false,
                error: Some(message),
                ..
            } => Err(ClientError::Api { status, message }),
            _ => Err(ClientError::MalformedResponse { status }),
        }
    }

    /// Like `send`, for endpoints that never legitimately answer 404.
    async fn send_expecting<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        match self.send(request).await? {
            Some(data) => Ok(data),
            None => Err(ClientError::Api {
                status: StatusCode::NOT_FOUND,
                message: String::from("Resource not found"),
            }
            .into()),
        }
    }
}

#[async_trait::async_trait]
impl EmployeeApi for HttpEmployeeClient {
    async fn health(&self) -> Result<HealthStatus> {
        self.send_expecting(self.http.get(self.url("/health"))).await
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee> {
        let request = self.http.post(self.url("/employees")).json(employee);
        self.send_expecting(request).await
    }

    async fn list(&self) -> Result<Vec<Employee>> {
        self.send_expecting(self.http.get(self.url("/employees"))).await
    }

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let request = self.http.get(self.url(&format!("/employees/{}", id)));
        Ok(self.send(request).await?)
    }

    async fn update(&self, id: EmployeeId, update: &EmployeeUpdate) -> Result<Option<Employee>> {
        let request = self
            .http
            .put(self.url(&format!("/employees/{}", id)))
            .json(update);
        Ok(self.send(request).await?)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool> {
        let request = self.http.delete(self.url(&format!("/employees/{}", id)));
        let deleted: Option<serde_json::Value> = self.send(request).await?;
        Ok(deleted.is_some())
    }

    async fn search(&self, department: &str) -> Result<Vec<Employee>> {
        let request = self
            .http
            .get(self.url("/employees/search"))
            .query(&[("department", department)]);
        self.send_expecting(request).await
    }
}
