//! `reqwest` transport for native callers.

use std::time::Duration;

use super::transport::{ApiRequest, ApiResponse, ApiTransport, Method, UploadRequest, parse_body};
use crate::config::Timeouts;
use crate::error::AuthError;

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the HTTP client cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::Config(e.to_string()))?;
        Ok(Self { http })
    }

    async fn finish(response: reqwest::Response) -> Result<ApiResponse, AuthError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body: parse_body(&text) })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let mut builder = self.http.request(to_reqwest(request.method), &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "request failed");
            AuthError::Network(e.to_string())
        })?;
        Self::finish(response).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse, AuthError> {
        let part = reqwest::multipart::Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.content_type)
            .map_err(|e| AuthError::Config(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part(request.field, part);
        let response = self
            .http
            .post(&request.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Self::finish(response).await
    }
}
