//! HTTP route handlers

pub mod health;
pub mod wishes;
