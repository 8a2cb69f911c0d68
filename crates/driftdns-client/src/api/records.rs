//! DNS record endpoints.

use crate::CloudflareClient;
use driftdns_core::{RecordUpdate, Result, ZoneRecord};

/// DNS record endpoints
pub struct RecordsApi<'a> {
    client: &'a CloudflareClient,
}

impl<'a> RecordsApi<'a> {
    pub(crate) fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// List every DNS record in a zone, all types included
    pub async fn list(&self, zone_id: &str) -> Result<Vec<ZoneRecord>> {
        self.client
            .get(&format!("/zones/{zone_id}/dns_records"))
            .await
    }

    /// Rewrite one record, addressed by its provider-side identifier.
    ///
    /// Returns Ok only when the provider both answered 2xx and flagged the
    /// operation successful in the response envelope.
    pub async fn update(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &RecordUpdate<'_>,
    ) -> Result<()> {
        self.client
            .put(&format!("/zones/{zone_id}/dns_records/{record_id}"), update)
            .await
    }
}
