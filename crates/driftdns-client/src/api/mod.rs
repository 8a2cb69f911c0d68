//! API endpoint modules.

mod records;
mod zones;

pub use records::RecordsApi;
pub use zones::ZonesApi;
