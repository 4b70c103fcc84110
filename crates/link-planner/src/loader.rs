//! Planner configuration loading from JSON files

use crate::{PlannerConfig, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Load and validate a [`PlannerConfig`]. Missing fields take defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<PlannerConfig> {
    let path = path.as_ref();
    info!("Loading planner config from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: PlannerConfig = serde_json::from_reader(reader)?;
    config.validate()?;

    info!(
        "Config: {} planes x {} satellites, {} relays (jitter {:.1} deg)",
        config.num_planes, config.sats_per_plane, config.num_relays, config.relay_jitter_deg
    );

    Ok(config)
}
