//! The reconciliation cycle.

use driftdns_client::{CloudflareClient, EchoClient};
use driftdns_core::{plan_updates, DetectedIps, Domain, DomainConfig};
use tracing::{debug, error, info};

use crate::{apply, detect, resolve};

/// What one cycle did, for the summary log line and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Addresses detection produced this cycle
    pub detected: DetectedIps,
    /// Updates the provider confirmed accepting
    pub updates_applied: usize,
    /// Updates that failed and will be retried next cycle
    pub updates_failed: usize,
    /// Domains skipped whole (missing name or unresolved zone)
    pub domains_skipped: usize,
    /// Hosts skipped whole (missing label or failed record listing)
    pub hosts_skipped: usize,
}

/// Drives detection, resolution, planning and application for every
/// configured domain.
///
/// The reconciler owns the runtime tree; cached zone and record
/// identifiers and last-known addresses live here between cycles.
/// `run_cycle` takes `&mut self`, so two cycles can never overlap.
pub struct Reconciler {
    api: CloudflareClient,
    echo: EchoClient,
    domains: Vec<Domain>,
}

impl Reconciler {
    /// Build a reconciler over an already-constructed runtime tree
    #[must_use]
    pub fn new(api: CloudflareClient, echo: EchoClient, domains: Vec<Domain>) -> Self {
        Self { api, echo, domains }
    }

    /// Build a reconciler straight from configuration
    #[must_use]
    pub fn from_config(
        api: CloudflareClient,
        echo: EchoClient,
        configs: &[DomainConfig],
    ) -> Self {
        let domains = configs.iter().map(Domain::from_config).collect();
        Self::new(api, echo, domains)
    }

    /// The runtime tree, with whatever identifiers and addresses are
    /// currently cached
    #[must_use]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Run one full reconciliation cycle.
    ///
    /// Every failure inside the cycle is contained to its scope: a failed
    /// zone resolution skips that domain, a failed record listing skips
    /// that host, a failed update skips that entry. The cycle itself
    /// always runs to completion.
    pub async fn run_cycle(&mut self) -> CycleStats {
        let mut stats = CycleStats {
            detected: detect::detect(&self.echo).await,
            ..CycleStats::default()
        };

        for domain in &mut self.domains {
            if domain.name.is_empty() {
                error!("missing domain name, skipping entry");
                stats.domains_skipped += 1;
                continue;
            }

            let zone_id = match resolve::ensure_zone_id(&self.api, domain).await {
                Ok(id) => id,
                Err(err) => {
                    error!(
                        domain = %domain.name,
                        error = %err,
                        "zone resolution failed, skipping domain this cycle"
                    );
                    stats.domains_skipped += 1;
                    continue;
                }
            };

            let Domain { name, hosts, .. } = domain;
            for host in hosts.iter_mut() {
                if host.label.is_empty() {
                    error!(domain = %name, "host name missing, skipping entry");
                    stats.hosts_skipped += 1;
                    continue;
                }

                if let Err(err) =
                    resolve::ensure_record_ids(&self.api, name, &zone_id, host).await
                {
                    error!(
                        domain = %name,
                        host = %host.label,
                        error = %err,
                        "record resolution failed, skipping host this cycle"
                    );
                    stats.hosts_skipped += 1;
                    continue;
                }

                let updates = plan_updates(host, &stats.detected);
                if updates.is_empty() {
                    debug!(domain = %name, host = %host.label, "records already current");
                    continue;
                }

                let (applied, failed) =
                    apply::apply_updates(&self.api, name, &zone_id, host, updates).await;
                stats.updates_applied += applied;
                stats.updates_failed += failed;
            }
        }

        info!(
            ipv4 = ?stats.detected.v4,
            ipv6 = ?stats.detected.v6,
            applied = stats.updates_applied,
            failed = stats.updates_failed,
            "reconciliation cycle complete"
        );
        stats
    }
}
