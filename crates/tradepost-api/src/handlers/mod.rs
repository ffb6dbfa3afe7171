//! HTTP request handlers, one module per domain.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod listing;
pub mod media;
pub mod message;
pub mod profile;
pub mod search;
