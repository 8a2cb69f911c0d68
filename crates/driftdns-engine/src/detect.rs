//! Public-address detection at the start of a cycle.

use driftdns_client::EchoClient;
use driftdns_core::DetectedIps;
use tracing::{debug, warn};

/// Detect the machine's current public addresses.
///
/// Both families are looked up concurrently so a stalled endpoint for one
/// cannot delay the other. A failed lookup leaves its family absent, which
/// downstream means "no candidate this cycle" and never "address removed".
pub(crate) async fn detect(echo: &EchoClient) -> DetectedIps {
    let (v4, v6) = tokio::join!(echo.lookup_v4(), echo.lookup_v6());

    let v4 = match v4 {
        Ok(addr) => {
            debug!(addr = %addr, "public IPv4 detected");
            Some(addr)
        }
        Err(err) => {
            warn!(error = %err, "no public IPv4 address detected");
            None
        }
    };

    let v6 = match v6 {
        Ok(addr) => {
            debug!(addr = %addr, "public IPv6 detected");
            Some(addr)
        }
        Err(err) => {
            warn!(error = %err, "no public IPv6 address detected");
            None
        }
    };

    DetectedIps { v4, v6 }
}
