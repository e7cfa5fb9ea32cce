//! `gloo-net` transport for the browser.

use gloo_net::http::{Request, RequestBuilder, Response};
use wasm_bindgen::JsValue;

use super::transport::{ApiRequest, ApiResponse, ApiTransport, Method, UploadRequest, parse_body};
use crate::error::AuthError;

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

fn builder_for(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn js_error(value: &JsValue) -> AuthError {
    AuthError::Network(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

async fn finish(response: Response) -> Result<ApiResponse, AuthError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    Ok(ApiResponse { status, body: parse_body(&text) })
}

#[async_trait::async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let mut builder = builder_for(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let sent = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| AuthError::Parse(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "request failed");
            AuthError::Network(e.to_string())
        })?;
        finish(response).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse, AuthError> {
        let bytes = js_sys::Uint8Array::from(request.bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&request.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error(&e))?;

        let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
        form.append_with_blob_and_filename(&request.field, &blob, &request.file_name)
            .map_err(|e| js_error(&e))?;

        let response = Request::post(&request.url)
            .body(form)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        finish(response).await
    }
}
