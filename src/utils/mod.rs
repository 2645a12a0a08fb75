// src/utils/mod.rs

pub mod assets;
pub mod scope;
pub mod ticker;
pub mod time;
