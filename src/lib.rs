// src/lib.rs
pub mod dirs;
pub mod extract;
pub mod fetch;
pub mod metadata;
