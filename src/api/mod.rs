// src/api/mod.rs

pub mod client;
pub mod interceptor;
pub mod upload;

pub use client::{ApiClient, ApiClientBuilder};
pub use interceptor::{Interceptor, RequestLogger, UnauthorizedLogger};
pub use upload::Upload;
