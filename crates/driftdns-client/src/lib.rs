//! HTTP surface for driftdns.
//!
//! This crate provides the [`CloudflareClient`] for the provider's REST API
//! and the [`EchoClient`] for public-address detection.

#![doc(html_root_url = "https://docs.rs/driftdns-client/0.1.0")]

pub mod api;
mod client;
mod echo;

pub use client::{CloudflareClient, CloudflareClientBuilder};
pub use driftdns_core::{DriftError, Result};
pub use echo::EchoClient;
