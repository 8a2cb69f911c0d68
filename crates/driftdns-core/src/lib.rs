//! Core types and reconciliation planning for driftdns.
//!
//! This crate holds everything the reconciler reasons about, with no I/O:
//!
//! - **Config**: the daemon's on-disk configuration model
//! - **Model**: the in-memory tree of domains, hosts and cached identifiers
//! - **Provider**: wire types for the Cloudflare-compatible API
//! - **Diff**: the pure planning step deciding which records need a rewrite
//! - **Errors**: [`DriftError`] and the crate-wide [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use driftdns_core::{plan_updates, DetectedIps, Host};
//!
//! let host = Host::new(String::from("www"));
//! let detected = DetectedIps {
//!     v4: Some("203.0.113.7".parse().unwrap()),
//!     v6: None,
//! };
//! // A fresh host with a detected v4 gets exactly one scheduled update.
//! assert_eq!(plan_updates(&host, &detected).len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/driftdns-core/0.1.0")]

pub mod config;
mod diff;
mod error;
pub mod types;

pub use config::{Config, Credentials, DetectorConfig, DomainConfig};
pub use diff::{plan_updates, RECORD_TTL};
pub use error::{DriftError, Result};
pub use types::*;
