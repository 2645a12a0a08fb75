// src/lib.rs

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use api::ApiClient;
pub use state::AppContext;
