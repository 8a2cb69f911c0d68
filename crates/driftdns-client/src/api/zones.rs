//! Zone endpoints.

use crate::CloudflareClient;
use driftdns_core::{Result, Zone};

/// Zone endpoints
pub struct ZonesApi<'a> {
    client: &'a CloudflareClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// List every zone visible to the account.
    ///
    /// Zone names are matched against configuration exactly; the caller
    /// picks the first zone whose name equals the configured domain.
    pub async fn list(&self) -> Result<Vec<Zone>> {
        self.client.get("/zones").await
    }
}
