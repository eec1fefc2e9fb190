use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub csv_path: PathBuf,

    #[serde(default = "default_map_path")]
    pub map_path: PathBuf,
    #[serde(default = "default_geojson_path")]
    pub geojson_path: PathBuf,

    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub zoom: u8,
    pub color: String,

    // labels closer than this to another ping of the day get nudged aside
    pub proximity_m: f64,
    pub offset_deg: f64,
    pub offset_step_deg: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            zoom: 15,
            color: "blue".to_string(),
            proximity_m: 50.0,
            offset_deg: 0.0005,
            offset_step_deg: 45.0,
        }
    }
}

fn default_map_path() -> PathBuf {
    PathBuf::from("map.html")
}

fn default_geojson_path() -> PathBuf {
    PathBuf::from("pings.geojson")
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}
