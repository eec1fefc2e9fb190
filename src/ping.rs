//! Serde types for the location ping CSV.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// One recorded (timestamp, latitude, longitude) observation.
#[derive(Debug, Clone, Deserialize)]
pub struct Ping {
    #[serde(rename = "datetime", deserialize_with = "wall_clock")]
    pub time: NaiveDateTime,
    #[serde(rename = "locationtimestamp")]
    pub timestamp_ms: i64,
    #[serde(rename = "locationlatitude")]
    pub lat: f64,
    #[serde(rename = "locationlongitude")]
    pub lon: f64,
}

// "2024-05-01 08:00:00"; some exports write RFC 3339 with an offset instead
fn wall_clock<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|t| t.naive_local()))
        .map_err(serde::de::Error::custom)
}

pub fn load(path: &Path) -> Result<Vec<Ping>> {
    let mut output = Vec::new();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for result in reader.deserialize() {
        let record: Ping = result?;
        output.push(record);
    }

    if output.is_empty() {
        bail!("{} contains no pings", path.display());
    }
    Ok(output)
}
