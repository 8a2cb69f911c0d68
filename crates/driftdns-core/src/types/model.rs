use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::config::DomainConfig;

/// DNS record families managed by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Wire spelling of the record type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution state of one provider-side record.
///
/// The reconciler resolves a record identifier at most once per process
/// lifetime. `Missing` means a listing succeeded and the provider holds no
/// record of this type, so the entry is skipped without asking again.
/// `Unknown` means no listing has succeeded yet and one is still owed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordRef {
    /// Not resolved yet; a record listing is needed.
    #[default]
    Unknown,
    /// Provider-side record identifier, cached for the process lifetime.
    Id(String),
    /// A listing confirmed the provider has no record of this type.
    Missing,
}

impl RecordRef {
    /// Returns true if a listing is still owed for this slot
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The cached identifier, if one was resolved
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            _ => None,
        }
    }
}

/// One managed domain with its resolved zone and hosts.
#[derive(Debug, Clone)]
pub struct Domain {
    /// Zone name as configured, matched exactly against the provider.
    pub name: String,

    /// Provider-side zone identifier, cached after the first successful
    /// lookup for the remainder of the process lifetime.
    pub zone_id: Option<String>,

    /// Managed hosts under this domain, in configuration order.
    pub hosts: Vec<Host>,
}

impl Domain {
    /// Build the runtime tree for one configured domain.
    #[must_use]
    pub fn from_config(config: &DomainConfig) -> Self {
        Self {
            name: config.name.clone(),
            zone_id: None,
            hosts: config.hosts.iter().cloned().map(Host::new).collect(),
        }
    }
}

/// One managed host label and everything known about its records.
#[derive(Debug, Clone)]
pub struct Host {
    /// Bare label; the record name is `<label>.<domain>`.
    pub label: String,

    /// Last IPv4 value the provider confirmed accepting.
    pub ipv4: Option<Ipv4Addr>,

    /// Last IPv6 value the provider confirmed accepting.
    pub ipv6: Option<Ipv6Addr>,

    /// Resolution slot for the A record.
    pub a_record: RecordRef,

    /// Resolution slot for the AAAA record.
    pub aaaa_record: RecordRef,

    /// When the provider last accepted an update for this host.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Host {
    /// A fresh host with nothing known yet.
    #[must_use]
    pub fn new(label: String) -> Self {
        Self {
            label,
            ipv4: None,
            ipv6: None,
            a_record: RecordRef::Unknown,
            aaaa_record: RecordRef::Unknown,
            confirmed_at: None,
        }
    }

    /// Fully qualified record name under the given domain.
    #[must_use]
    pub fn fqdn(&self, domain_name: &str) -> String {
        format!("{}.{}", self.label, domain_name)
    }

    /// Resolution slot for the given record family
    #[must_use]
    pub const fn record_ref(&self, record_type: RecordType) -> &RecordRef {
        match record_type {
            RecordType::A => &self.a_record,
            RecordType::Aaaa => &self.aaaa_record,
        }
    }

    /// Mutable resolution slot for the given record family
    pub fn record_ref_mut(&mut self, record_type: RecordType) -> &mut RecordRef {
        match record_type {
            RecordType::A => &mut self.a_record,
            RecordType::Aaaa => &mut self.aaaa_record,
        }
    }

    /// Returns true if either family still needs a record listing
    #[must_use]
    pub const fn needs_record_listing(&self) -> bool {
        self.a_record.is_unknown() || self.aaaa_record.is_unknown()
    }

    /// Record a provider-confirmed update.
    ///
    /// This is the only place the last-known values change; a failed update
    /// leaves them untouched so the next cycle schedules a retry.
    pub fn confirm(&mut self, update: &PendingUpdate, at: DateTime<Utc>) {
        match update.content {
            IpAddr::V4(addr) => self.ipv4 = Some(addr),
            IpAddr::V6(addr) => self.ipv6 = Some(addr),
        }
        self.confirmed_at = Some(at);
    }
}

/// Public addresses detected at the start of a cycle.
///
/// An absent family means detection produced no candidate this cycle; it
/// never means "the address went away", so nothing is scheduled for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectedIps {
    /// Detected public IPv4 address, if any
    pub v4: Option<Ipv4Addr>,
    /// Detected public IPv6 address, if any
    pub v6: Option<Ipv6Addr>,
}

impl DetectedIps {
    /// Returns true if neither family produced a candidate
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.v4.is_none() && self.v6.is_none()
    }
}

/// One update the diff scheduled for the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Which record family to rewrite
    pub record_type: RecordType,
    /// The address to publish
    pub content: IpAddr,
    /// TTL to publish alongside the address
    pub ttl: u32,
}
