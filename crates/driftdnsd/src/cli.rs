//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// Keep DNS records pointed at this machine.
///
/// driftdnsd periodically detects the machine's public IPv4 and IPv6
/// addresses and rewrites the configured provider-side A and AAAA records
/// whenever they drift apart.
#[derive(Parser, Debug)]
#[command(name = "driftdnsd")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(short = 'c', long, env = "DRIFTDNS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run a single reconciliation cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "DRIFTDNS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
