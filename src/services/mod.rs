// src/services/mod.rs
//
// One async function per endpoint. No orchestration here; controllers
// decide what to call and what to do with failures.

pub mod auth;
pub mod comment;
pub mod community;
pub mod quiz;
pub mod user;
