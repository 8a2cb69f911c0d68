//! Reconciliation engine for driftdns.
//!
//! The [`Reconciler`] keeps provider-side DNS records aligned with the
//! machine's detected public addresses. Each call to
//! [`Reconciler::run_cycle`] detects the current addresses, resolves any
//! missing provider identifiers, plans the minimal set of record rewrites
//! and pushes them, isolating every failure to the narrowest scope.

#![doc(html_root_url = "https://docs.rs/driftdns-engine/0.1.0")]

mod apply;
mod detect;
mod reconciler;
mod resolve;

pub use reconciler::{CycleStats, Reconciler};
