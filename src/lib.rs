//! Spotgrid: browsable archive core for cloud spot-instance pricing and
//! availability snapshots across AWS, GCP and Azure.
//!
//! The crate holds the vendor topology resolver and the time-series
//! reconstruction engine: topology indices built from raw association
//! dumps, the AWS zone-to-region derivation, the cascading filter
//! resolver, and the sparse-to-dense series reconstructor. Rendering,
//! routing and transport live in external collaborators that consume the
//! plain-data state this crate publishes.

pub mod config;
pub mod engine;
pub mod exec;
pub mod state;
pub mod topology_manager;
pub mod types;
