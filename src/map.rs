//! Renders the day tracks as a self-contained Leaflet HTML page.

use std::{fmt::Write as _, fs};

use anyhow::{Context, Result};

use crate::{
    config::{Config, RenderConfig},
    label,
    ping::{self, Ping},
    track::{self, DayTrack},
};

const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<title>pingmap</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css"
  crossorigin="anonymous" referrerpolicy="no-referrer" />
<script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"
  crossorigin="anonymous" referrerpolicy="no-referrer"></script>
<style>
html, body { height: 100%; margin: 0; }
#map { height: 100%; width: 100%; }
</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView(@CENTER@, @ZOOM@);
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
var overlays = {};
@BODY@
</script>
</body>
</html>
"#;

const TOP_STAY_LABEL: &str =
    "<div style='background-color: red; padding: 3px; border-radius: 50%; color: white;'>";
const STAY_LABEL: &str = "<div style='background-color: white; padding: 2px; border-radius: 50%;'>";

pub fn run(config: &Config) -> Result<()> {
    let pings = ping::load(&config.csv_path)?;
    let days = track::group_by_day(&pings);

    let html = render(&pings, &days, &config.render)?;
    fs::write(&config.map_path, html)
        .with_context(|| format!("Failed to write {}", config.map_path.display()))?;

    println!(
        "{} pings over {} days -> {}",
        pings.len(),
        days.len(),
        config.map_path.display()
    );
    Ok(())
}

fn render(pings: &[Ping], days: &[DayTrack], config: &RenderConfig) -> Result<String> {
    let center_lat = pings.iter().map(|p| p.lat).sum::<f64>() / pings.len() as f64;
    let center_lon = pings.iter().map(|p| p.lon).sum::<f64>() / pings.len() as f64;
    // everything user-controlled is embedded through JSON encoding
    let color = serde_json::to_string(&config.color)?;

    let mut body = String::new();
    for (d, day) in days.iter().enumerate() {
        let group = format!("day{d}");
        writeln!(body, "var {group} = L.layerGroup().addTo(map);")?;
        writeln!(
            body,
            "overlays[{}] = {group};",
            serde_json::to_string(&day.day.to_string())?
        )?;

        let path: Vec<[f64; 2]> = day.pings.iter().map(|p| [p.lat, p.lon]).collect();
        writeln!(
            body,
            "L.polyline({}, {{color: {color}, weight: 2.5, opacity: 0.7}}).addTo({group});",
            serde_json::to_string(&path)?
        )?;

        let placements = label::place_labels(&day.pings, config);
        let top = track::top_stays(&day.stay_minutes, 2);
        for (i, (ping, placement)) in day.pings.iter().zip(&placements).enumerate() {
            for leader in &placement.leaders {
                writeln!(
                    body,
                    "L.polyline({}, {{color: {color}, weight: 1, opacity: 0.7, dashArray: '5, 5'}}).addTo({group});",
                    serde_json::to_string(leader)?
                )?;
            }

            writeln!(
                body,
                "L.circleMarker([{}, {}], {{radius: {}, fill: true, color: {color}, fillOpacity: 0.6}}).addTo({group});",
                ping.lat,
                ping.lon,
                track::size_tier(day.stay_minutes[i])
            )?;

            let style = if top.contains(&i) {
                TOP_STAY_LABEL
            } else {
                STAY_LABEL
            };
            let icon = format!("{style}{}</div>", i + 1);
            let popup = format!(
                "{} - Stay: {}",
                ping.time,
                format_duration(day.stay_minutes[i])
            );
            writeln!(
                body,
                "L.marker([{}, {}], {{icon: L.divIcon({{html: {}}})}}).bindPopup({}).addTo({group});",
                placement.lat,
                placement.lon,
                serde_json::to_string(&icon)?,
                serde_json::to_string(&popup)?
            )?;
        }
    }
    body.push_str("L.control.layers(null, overlays, {collapsed: false}).addTo(map);\n");

    Ok(TEMPLATE
        .replace("@CENTER@", &format!("[{center_lat}, {center_lon}]"))
        .replace("@ZOOM@", &config.zoom.to_string())
        .replace("@BODY@", &body))
}

pub fn format_duration(minutes: Option<f64>) -> String {
    let Some(minutes) = minutes else {
        return "Unknown duration".to_string();
    };
    // unsorted input can produce a negative gap; show it as no stay at all
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0) as i64;
    let mins = (minutes % 60.0) as i64;
    if hours > 0 {
        format!("{hours} h {mins} min")
    } else {
        format!("{mins} min")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn ping(at: &str, lat: f64, lon: f64) -> Ping {
        let time = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").unwrap();
        Ping {
            time,
            timestamp_ms: time.and_utc().timestamp_millis(),
            lat,
            lon,
        }
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(None), "Unknown duration");
        assert_eq!(format_duration(Some(35.0)), "35 min");
        assert_eq!(format_duration(Some(60.0)), "1 h 0 min");
        assert_eq!(format_duration(Some(135.5)), "2 h 15 min");
        // negative gaps from unsorted input saturate to zero
        assert_eq!(format_duration(Some(-90.0)), "0 min");
    }

    #[test]
    fn one_marker_and_label_per_ping() {
        let pings = vec![
            ping("2024-05-01 08:00:00", 47.5, 19.0),
            ping("2024-05-01 09:00:00", 47.5, 19.0),
            ping("2024-05-02 10:00:00", 47.6, 19.1),
        ];
        let days = track::group_by_day(&pings);
        let html = render(&pings, &days, &RenderConfig::default()).unwrap();

        assert_eq!(html.matches("L.circleMarker(").count(), pings.len());
        assert_eq!(html.matches("L.marker(").count(), pings.len());
    }

    #[test]
    fn days_become_toggleable_layers() {
        let pings = vec![
            ping("2024-05-01 08:00:00", 47.5, 19.0),
            ping("2024-05-02 10:00:00", 47.6, 19.1),
        ];
        let days = track::group_by_day(&pings);
        let html = render(&pings, &days, &RenderConfig::default()).unwrap();

        assert!(html.contains("overlays[\"2024-05-01\"]"));
        assert!(html.contains("overlays[\"2024-05-02\"]"));
        assert!(html.contains("L.control.layers(null, overlays, {collapsed: false})"));
    }

    #[test]
    fn coincident_pings_get_leader_lines() {
        let pings = vec![
            ping("2024-05-01 08:00:00", 47.5, 19.0),
            ping("2024-05-01 09:00:00", 47.5, 19.0),
        ];
        let days = track::group_by_day(&pings);
        let html = render(&pings, &days, &RenderConfig::default()).unwrap();
        assert!(html.contains("dashArray: '5, 5'"));
    }

    #[test]
    fn longest_stay_is_highlighted() {
        let pings = vec![
            ping("2024-05-01 08:00:00", 47.5, 19.0),
            ping("2024-05-01 12:00:00", 47.6, 19.1),
            ping("2024-05-01 12:10:00", 47.7, 19.2),
        ];
        let days = track::group_by_day(&pings);
        let html = render(&pings, &days, &RenderConfig::default()).unwrap();

        assert!(html.contains("background-color: red"));
        assert!(html.contains("Stay: 4 h 0 min"));
        assert!(html.contains("Unknown duration"));
    }
}
