//! Provider identifier resolution with process-lifetime caching.

use driftdns_client::CloudflareClient;
use driftdns_core::{Domain, DriftError, Host, RecordRef, RecordType, Result};
use tracing::{debug, info};

/// Resolve and cache the zone identifier for a domain.
///
/// A cached identifier makes this a no-op; the zone listing is issued at
/// most once per domain for the process lifetime. On failure the cache
/// stays empty and the caller skips the whole domain for this cycle.
pub(crate) async fn ensure_zone_id(
    api: &CloudflareClient,
    domain: &mut Domain,
) -> Result<String> {
    if let Some(id) = &domain.zone_id {
        return Ok(id.clone());
    }

    debug!(domain = %domain.name, "zone id missing, resolving");
    let zones = api.zones().list().await?;
    let zone = zones
        .into_iter()
        .find(|z| z.name == domain.name)
        .ok_or_else(|| DriftError::ZoneNotFound(domain.name.clone()))?;

    info!(domain = %domain.name, zone_id = %zone.id, "zone id resolved");
    domain.zone_id = Some(zone.id.clone());
    Ok(zone.id)
}

/// Resolve and cache the record identifiers for a host.
///
/// One successful listing settles both families: each slot either gets the
/// provider's record identifier or is marked missing, and neither listing
/// nor marking is repeated afterwards. A failed listing leaves unresolved
/// slots untouched so the next cycle retries.
pub(crate) async fn ensure_record_ids(
    api: &CloudflareClient,
    domain_name: &str,
    zone_id: &str,
    host: &mut Host,
) -> Result<()> {
    if !host.needs_record_listing() {
        return Ok(());
    }

    let fqdn = host.fqdn(domain_name);
    debug!(host = %fqdn, "record ids missing, resolving");
    let records = api.records().list(zone_id).await?;

    for record_type in [RecordType::A, RecordType::Aaaa] {
        if !host.record_ref(record_type).is_unknown() {
            continue;
        }
        match records.iter().find(|r| r.matches(&fqdn, record_type)) {
            Some(record) => {
                info!(
                    host = %fqdn,
                    record_type = %record_type,
                    record_id = %record.id,
                    "record id resolved"
                );
                *host.record_ref_mut(record_type) = RecordRef::Id(record.id.clone());
            }
            None => {
                info!(
                    host = %fqdn,
                    record_type = %record_type,
                    "provider has no record of this type, leaving it unmanaged"
                );
                *host.record_ref_mut(record_type) = RecordRef::Missing;
            }
        }
    }

    Ok(())
}
