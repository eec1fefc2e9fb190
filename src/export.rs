use std::fs;

use anyhow::{Context, Result};
use geo_types::LineString;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::{config::Config, ping, track, track::DayTrack};

pub fn run(config: &Config) -> Result<()> {
    let pings = ping::load(&config.csv_path)?;
    let days = track::group_by_day(&pings);

    let collection = FeatureCollection {
        bbox: None,
        features: features(&days),
        foreign_members: None,
    };
    fs::write(&config.geojson_path, collection.to_string())
        .with_context(|| format!("Failed to write {}", config.geojson_path.display()))?;

    println!("wrote {}", config.geojson_path.display());
    Ok(())
}

/// One LineString feature per day plus one Point feature per ping.
fn features(days: &[DayTrack]) -> Vec<Feature> {
    let mut features = Vec::new();
    for day in days {
        let line: LineString = day.pings.iter().map(|p| (p.lon, p.lat)).collect();
        let mut properties = JsonObject::new();
        properties.insert("day".to_string(), json!(day.day.to_string()));
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });

        for (i, ping) in day.pings.iter().enumerate() {
            let mut properties = JsonObject::new();
            properties.insert("day".to_string(), json!(day.day.to_string()));
            properties.insert("seq".to_string(), json!(i + 1));
            properties.insert("stay_min".to_string(), json!(day.stay_minutes[i]));
            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![ping.lon, ping.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }
    }
    features
}
