// src/api/client.rs

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::{
    api::{
        interceptor::{Interceptor, RequestLogger, UnauthorizedLogger},
        upload::Upload,
    },
    config::Config,
    error::AppError,
};

/// Shared HTTP client for the REST API.
///
/// * Resolves paths against one base URL.
/// * Keeps the session cookie between calls.
/// * Runs every request through the registered interceptors.
/// * Decodes JSON bodies and maps non-success statuses to `AppError`.
///
/// Cloning is cheap; all clones share the connection pool and cookie jar.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

pub struct ApiClientBuilder {
    base_url: Url,
    timeout: Duration,
    interceptors: Vec<Arc<dyn Interceptor>>,
    default_interceptors: bool,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends an interceptor; it runs after the ones registered before it.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn without_default_interceptors(mut self) -> Self {
        self.default_interceptors = false;
        self
    }

    pub fn build(self) -> Result<ApiClient, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;

        // `Url::join` drops the last segment unless the base ends with '/'
        let mut base_url = self.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut interceptors: Vec<Arc<dyn Interceptor>> = Vec::new();
        if self.default_interceptors {
            interceptors.push(Arc::new(RequestLogger));
            interceptors.push(Arc::new(UnauthorizedLogger));
        }
        interceptors.extend(self.interceptors);

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url,
                interceptors,
            }),
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url,
            timeout: Duration::from_secs(15),
            interceptors: Vec::new(),
            default_interceptors: true,
        }
    }

    pub fn new(config: &Config) -> Result<Self, AppError> {
        Self::builder(config.api_base_url.clone())
            .timeout(config.request_timeout)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Absolute URL of an API path. Leading slashes are ignored.
    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(self.request(Method::GET, path)?.query(query)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(self.request(Method::POST, path)?).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path)?.json(body)).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PATCH, path)?.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.send(self.request(Method::DELETE, path)?).await
    }

    /// Sends one file as a multipart form.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        upload: Upload,
    ) -> Result<T, AppError> {
        let form = upload.into_form()?;
        self.send(self.request(method, path)?.multipart(form)).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        Ok(self.inner.http.request(method, self.url(path)?))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let mut request = builder.build()?;
        for interceptor in &self.inner.interceptors {
            interceptor.on_request(&mut request).await?;
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let response = match self.inner.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = AppError::from(e);
                self.report_error(&method, &url, &err).await;
                return Err(err);
            }
        };

        let status = response.status();
        for interceptor in &self.inner.interceptors {
            interceptor.on_response(&method, &url, status).await;
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = AppError::from(e);
                self.report_error(&method, &url, &err).await;
                return Err(err);
            }
        };

        if !status.is_success() {
            let err = AppError::from_response(status, &body);
            self.report_error(&method, &url, &err).await;
            return Err(err);
        }

        decode_body(&body)
    }

    async fn report_error(&self, method: &Method, url: &Url, error: &AppError) {
        for interceptor in &self.inner.interceptors {
            interceptor.on_error(method, url, error).await;
        }
    }
}

/// Empty bodies decode as JSON `null` so callers can ask for `()` or `Option<T>`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("null")?);
    }
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_under_base_path() {
        let base = Url::parse("http://localhost:8080/api").unwrap();
        let client = ApiClient::builder(base).build().unwrap();

        assert_eq!(
            client.url("/quizzes/42/take").unwrap().as_str(),
            "http://localhost:8080/api/quizzes/42/take"
        );
        assert_eq!(
            client.url("users/me").unwrap().as_str(),
            "http://localhost:8080/api/users/me"
        );
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        decode_body::<()>(b"").unwrap();
        let value: Option<u32> = decode_body(b"  ").unwrap();
        assert_eq!(value, None);
        let err = decode_body::<u32>(b"not json").unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}
