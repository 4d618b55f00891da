//! Test fixture loader for riskcast catalogs and configs.
//!
//! Fixtures live next to this crate so every workspace crate resolves the
//! same files regardless of where its tests run from.

use std::path::PathBuf;

use riskcast_core::{RiskCatalog, RiskcastConfig};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = read_fixture(relative_path);
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "Failed to parse fixture {}: {}",
            fixture_path(relative_path).display(),
            e
        )
    })
}

/// Read a fixture file as text.
pub fn read_fixture(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load a catalog from `catalogs/<name>.json`.
pub fn load_catalog(name: &str) -> RiskCatalog {
    load_fixture(&format!("catalogs/{name}.json"))
}

/// The ten-factor shipbuilding network: four roots, six CPT-backed factors,
/// four cost drivers.
pub fn shipbuilding_catalog() -> RiskCatalog {
    load_catalog("shipbuilding")
}

/// Shipbuilding recommendation thresholds and action triggers.
pub fn recommendation_config() -> RiskcastConfig {
    RiskcastConfig::from_toml(&read_fixture("catalogs/recommendation.toml"))
        .unwrap_or_else(|e| panic!("Failed to load recommendation fixture: {e}"))
}

/// Config with a fixed seed for reproducible simulation tests.
pub fn seeded_config(seed: u64) -> RiskcastConfig {
    let mut config = RiskcastConfig::default();
    config.simulation.seed = Some(seed);
    config
}
