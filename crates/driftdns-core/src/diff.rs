//! Decides which record families need publishing this cycle.

use std::net::IpAddr;

use crate::types::{DetectedIps, Host, PendingUpdate, RecordType};

/// TTL published with every record update.
pub const RECORD_TTL: u32 = 60;

/// Plan the updates one host needs for the current cycle.
///
/// A family is scheduled when detection produced an address and the host's
/// last confirmed value differs or was never set. Both families follow the
/// same rule. An absent detection schedules nothing for its family, so a
/// stale provider-side record outlives a detection outage rather than being
/// touched. Output order is A before AAAA.
#[must_use]
pub fn plan_updates(host: &Host, detected: &DetectedIps) -> Vec<PendingUpdate> {
    let mut updates = Vec::with_capacity(2);

    if let Some(addr) = detected.v4 {
        if host.ipv4 != Some(addr) {
            updates.push(PendingUpdate {
                record_type: RecordType::A,
                content: IpAddr::V4(addr),
                ttl: RECORD_TTL,
            });
        }
    }

    if let Some(addr) = detected.v6 {
        if host.ipv6 != Some(addr) {
            updates.push(PendingUpdate {
                record_type: RecordType::Aaaa,
                content: IpAddr::V6(addr),
                ttl: RECORD_TTL,
            });
        }
    }

    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn host_with(v4: Option<Ipv4Addr>, v6: Option<Ipv6Addr>) -> Host {
        let mut host = Host::new(String::from("www"));
        host.ipv4 = v4;
        host.ipv6 = v6;
        host
    }

    #[test]
    fn test_fresh_host_schedules_every_detected_family() {
        let host = host_with(None, None);
        let detected = DetectedIps {
            v4: Some(Ipv4Addr::new(9, 9, 9, 9)),
            v6: Some("2001:db8::1".parse().unwrap()),
        };
        let updates = plan_updates(&host, &detected);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].record_type, RecordType::A);
        assert_eq!(updates[1].record_type, RecordType::Aaaa);
        assert_eq!(updates[0].content, "9.9.9.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_unchanged_addresses_schedule_nothing() {
        let host = host_with(
            Some(Ipv4Addr::new(9, 9, 9, 9)),
            Some("2001:db8::1".parse().unwrap()),
        );
        let detected = DetectedIps {
            v4: Some(Ipv4Addr::new(9, 9, 9, 9)),
            v6: Some("2001:db8::1".parse().unwrap()),
        };
        assert!(plan_updates(&host, &detected).is_empty());
    }

    #[test]
    fn test_changed_v4_schedules_only_a() {
        let host = host_with(
            Some(Ipv4Addr::new(192, 0, 2, 1)),
            Some("2001:db8::1".parse().unwrap()),
        );
        let detected = DetectedIps {
            v4: Some(Ipv4Addr::new(9, 9, 9, 9)),
            v6: Some("2001:db8::1".parse().unwrap()),
        };
        let updates = plan_updates(&host, &detected);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].record_type, RecordType::A);
        assert_eq!(updates[0].ttl, RECORD_TTL);
    }

    #[test]
    fn test_absent_v4_detection_leaves_a_alone() {
        // Detection failure means "no candidate", never "address removed".
        let host = host_with(Some(Ipv4Addr::new(192, 0, 2, 1)), None);
        let detected = DetectedIps {
            v4: None,
            v6: Some("2001:db8::1".parse().unwrap()),
        };
        let updates = plan_updates(&host, &detected);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].record_type, RecordType::Aaaa);
    }

    #[test]
    fn test_absent_v6_detection_leaves_aaaa_alone() {
        // Same rule as v4; the families are never treated asymmetrically.
        let host = host_with(None, Some("2001:db8::1".parse().unwrap()));
        let detected = DetectedIps {
            v4: Some(Ipv4Addr::new(9, 9, 9, 9)),
            v6: None,
        };
        let updates = plan_updates(&host, &detected);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].record_type, RecordType::A);
    }

    #[test]
    fn test_nothing_detected_schedules_nothing() {
        let host = host_with(Some(Ipv4Addr::new(192, 0, 2, 1)), None);
        assert!(plan_updates(&host, &DetectedIps::default()).is_empty());
    }

    #[test]
    fn test_v6_spelling_differences_are_not_changes() {
        // Address equality is by value, so a long-form spelling of the same
        // address cannot trigger a spurious update.
        let long: Ipv6Addr = "2001:0db8:0000:0000:0000:0000:0000:0001".parse().unwrap();
        let short: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let host = host_with(None, Some(long));
        let detected = DetectedIps {
            v4: None,
            v6: Some(short),
        };
        assert!(plan_updates(&host, &detected).is_empty());
    }

    #[test]
    fn test_first_confirmation_counts_as_change() {
        let host = host_with(None, None);
        let detected = DetectedIps {
            v4: Some(Ipv4Addr::new(9, 9, 9, 9)),
            v6: None,
        };
        let updates = plan_updates(&host, &detected);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].content, IpAddr::V4(Ipv4Addr::new(9, 9, 9, 9)));
    }
}
