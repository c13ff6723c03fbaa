pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{AircraftDb, load_aircraft_db, load_catalog, load_units};
pub use config::PlannerConfig;
pub use error::{CatalogError, CatalogResult, ConfigError, ConfigResult};
pub use types::*;
