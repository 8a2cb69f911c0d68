//! driftdnsd binary entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    driftdnsd::run().await
}
