// src/api/interceptor.rs

use async_trait::async_trait;
use reqwest::{Method, Request, StatusCode};
use url::Url;

use crate::error::AppError;

/// Cross-cutting hook around every request the client sends.
///
/// Interceptors run in registration order. `on_request` may rewrite the
/// outgoing request or abort it by returning an error; the two other hooks
/// only observe.
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, _request: &mut Request) -> Result<(), AppError> {
        Ok(())
    }

    async fn on_response(&self, _method: &Method, _url: &Url, _status: StatusCode) {}

    async fn on_error(&self, _method: &Method, _url: &Url, _error: &AppError) {}
}

/// Traces every request and its outcome.
#[derive(Debug, Default)]
pub struct RequestLogger;

#[async_trait]
impl Interceptor for RequestLogger {
    async fn on_request(&self, request: &mut Request) -> Result<(), AppError> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(())
    }

    async fn on_response(&self, method: &Method, url: &Url, status: StatusCode) {
        tracing::debug!(%method, %url, status = status.as_u16(), "response received");
    }

    async fn on_error(&self, method: &Method, url: &Url, error: &AppError) {
        tracing::warn!(%method, %url, "request failed: {}", error);
    }
}

/// Logs 401 responses. The session is left as is; the caller decides.
#[derive(Debug, Default)]
pub struct UnauthorizedLogger;

#[async_trait]
impl Interceptor for UnauthorizedLogger {
    async fn on_response(&self, method: &Method, url: &Url, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!(%method, %url, "Unauthorized");
        }
    }
}
