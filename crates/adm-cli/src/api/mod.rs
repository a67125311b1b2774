//! REST client for the orchestration service
//!
//! Implements the `adm-core` service traits over HTTP with reqwest.

mod client;

pub use client::{AdmiralClient, AUTH_TOKEN_HEADER};
