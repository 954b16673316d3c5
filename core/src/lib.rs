//! Typed, I/O-free client for the `/client` HTTP resource.
//!
//! # Overview
//! `ClientApi` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. The caller runs the actual round-trip.
//!
//! # Design
//! - `ClientApi` holds only `base_url`.
//! - Each operation is a `build_*` / `parse_*` pair.
//! - DTOs are defined independently from the server crate.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ClientApi;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Client, ClientPatch, NewClient};
