use crate::types::Vendor;

/// Archive service tuning parameters.
///
/// Defaults match the production deployment; override endpoints through
/// the environment (see main.rs), everything else here.
#[derive(Debug, Clone)]
pub struct Config {
    // Which vendors we maintain topologies for.
    pub vendors: Vec<Vendor>,

    // Vendor selected at startup (drives the initial latest-snapshot load).
    pub default_vendor: Vendor,

    // How often the topology manager refetches the association dumps and
    // rebuilds each vendor's index wholesale.
    pub topology_refresh_ms: u64,

    // Engine housekeeping tick. The engine mostly reacts to commands; the
    // tick only backstops the active vendor's latest-snapshot load.
    pub tick_ms: u64,

    // Longest allowed query span, in calendar months. The remote service
    // rejects anything longer; we reject before issuing.
    pub max_range_months: u32,

    // Capacity of the session/query command channels.
    pub command_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendors: Vendor::EVERY.to_vec(),
            default_vendor: Vendor::Aws,

            // Collectors publish new dumps a few times a day; hourly is plenty.
            topology_refresh_ms: 3_600_000,

            tick_ms: 1_000,

            max_range_months: 1,

            command_buffer: 256,
        }
    }
}
