//! Pushing planned updates to the provider.

use chrono::Utc;
use driftdns_client::CloudflareClient;
use driftdns_core::{Host, PendingUpdate, RecordRef, RecordUpdate};
use tracing::{debug, error, info};

/// Apply one host's planned updates, entry by entry.
///
/// Each update is addressed by the cached record identifier, never by an
/// address value. A confirmed success is the only thing that moves the
/// host's last-known value; a failure leaves it untouched so the same
/// update is planned again next cycle. One failing entry never stops the
/// host's other entry.
pub(crate) async fn apply_updates(
    api: &CloudflareClient,
    domain_name: &str,
    zone_id: &str,
    host: &mut Host,
    updates: Vec<PendingUpdate>,
) -> (usize, usize) {
    let mut applied = 0;
    let mut failed = 0;
    let fqdn = host.fqdn(domain_name);

    for update in updates {
        let record_id = match host.record_ref(update.record_type) {
            RecordRef::Id(id) => id.clone(),
            // Nothing to address the PUT at; resolution already said why.
            RecordRef::Unknown | RecordRef::Missing => {
                debug!(
                    host = %fqdn,
                    record_type = %update.record_type,
                    "no record id, skipping update"
                );
                continue;
            }
        };

        let body = RecordUpdate {
            id: &record_id,
            record_type: update.record_type,
            name: &fqdn,
            content: update.content,
            ttl: update.ttl,
        };

        match api.records().update(zone_id, &record_id, &body).await {
            Ok(()) => {
                host.confirm(&update, Utc::now());
                info!(
                    host = %fqdn,
                    record_type = %update.record_type,
                    ip = %update.content,
                    "update successful"
                );
                applied += 1;
            }
            Err(err) => {
                error!(
                    domain = %domain_name,
                    host = %fqdn,
                    record_type = %update.record_type,
                    ip = %update.content,
                    error = %err,
                    "update failed"
                );
                failed += 1;
            }
        }
    }

    (applied, failed)
}
