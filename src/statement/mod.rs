// src/statement/mod.rs
pub mod models;
pub mod source;
