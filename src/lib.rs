//! libris - a small self-hostable library catalog service
//!
//! Authenticated users register Author and Book records and manage them
//! over an HTTP API. Book covers are stored inline and exposed as data URIs.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod http;
pub mod observability;
pub mod store;
