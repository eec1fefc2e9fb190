//! Keeps numbered labels readable when pings cluster in one spot.

use geo::{HaversineDistance, Point};

use crate::{config::RenderConfig, ping::Ping};

/// Where a ping's label ends up, plus the dashed leader segments drawn while
/// it was nudged away from its anchor.
#[derive(Debug)]
pub struct Placement {
    pub lat: f64,
    pub lon: f64,
    pub leaders: Vec<[[f64; 2]; 2]>,
}

pub fn apply_offset(lat: f64, lon: f64, angle_deg: f64, distance_deg: f64) -> (f64, f64) {
    let angle = angle_deg.to_radians();
    (
        lat + distance_deg * angle.sin(),
        lon + distance_deg * angle.cos(),
    )
}

fn haversine_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    Point::new(a.1, a.0).haversine_distance(&Point::new(b.1, b.0))
}

/// Place a label per ping. A label starts on its ping; each other ping of the
/// day closer than `proximity_m` pushes it one step further out, along an
/// angle that grows with the ping's position in the day so stacked labels fan
/// apart.
pub fn place_labels(pings: &[Ping], config: &RenderConfig) -> Vec<Placement> {
    pings
        .iter()
        .enumerate()
        .map(|(i, ping)| {
            let anchor = (ping.lat, ping.lon);
            let angle = config.offset_step_deg * i as f64;
            let mut position = anchor;
            let mut leaders = Vec::new();

            for (j, other) in pings.iter().enumerate() {
                if i == j {
                    continue;
                }
                if haversine_m(position, (other.lat, other.lon)) < config.proximity_m {
                    position = apply_offset(position.0, position.1, angle, config.offset_deg);
                    leaders.push([[anchor.0, anchor.1], [position.0, position.1]]);
                }
            }

            Placement {
                lat: position.0,
                lon: position.1,
                leaders,
            }
        })
        .collect()
}
