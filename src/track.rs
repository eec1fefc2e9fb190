use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ping::Ping;

/// All pings of one calendar day, with the derived stay duration per ping.
///
/// `stay_minutes[i]` is the gap to the next ping. For the last ping of a day
/// it is the gap to the first ping of the following day, or `None` when that
/// day has no pings.
#[derive(Debug)]
pub struct DayTrack {
    pub day: NaiveDate,
    pub pings: Vec<Ping>,
    pub stay_minutes: Vec<Option<f64>>,
}

pub fn group_by_day(pings: &[Ping]) -> Vec<DayTrack> {
    let mut days: BTreeMap<NaiveDate, Vec<Ping>> = BTreeMap::new();
    for ping in pings {
        days.entry(ping.time.date()).or_default().push(ping.clone());
    }

    let first_of_day: BTreeMap<NaiveDate, i64> = days
        .iter()
        .map(|(day, pings)| (*day, pings[0].timestamp_ms))
        .collect();

    days.into_iter()
        .map(|(day, pings)| {
            let mut stay_minutes: Vec<Option<f64>> = pings
                .windows(2)
                .map(|w| Some(gap_minutes(w[0].timestamp_ms, w[1].timestamp_ms)))
                .collect();

            // the day's last stay runs until the next tracked day begins
            let last_ms = pings[pings.len() - 1].timestamp_ms;
            let next = day.succ_opt().and_then(|d| first_of_day.get(&d));
            stay_minutes.push(next.map(|ms| gap_minutes(last_ms, *ms)));

            DayTrack {
                day,
                pings,
                stay_minutes,
            }
        })
        .collect()
}

fn gap_minutes(from_ms: i64, to_ms: i64) -> f64 {
    (to_ms - from_ms) as f64 / 60_000.0
}

/// Marker radius for a stay duration. Gaps beyond a full day (and unknown
/// gaps) fall back to the smallest marker.
pub fn size_tier(stay_minutes: Option<f64>) -> f64 {
    match stay_minutes {
        Some(gap) if gap <= 10.0 => 5.0,
        Some(gap) if gap <= 60.0 => 10.0,
        Some(gap) if gap <= 120.0 => 15.0,
        Some(gap) if gap <= 240.0 => 20.0,
        Some(gap) if gap <= 1440.0 => 25.0,
        _ => 5.0,
    }
}

/// Indices of the `n` longest known stays, longest first.
pub fn top_stays(stay_minutes: &[Option<f64>], n: usize) -> Vec<usize> {
    let mut known: Vec<(usize, f64)> = stay_minutes
        .iter()
        .enumerate()
        .filter_map(|(i, gap)| gap.map(|gap| (i, gap)))
        .collect();
    known.sort_by(|a, b| b.1.total_cmp(&a.1));
    known.truncate(n);
    known.into_iter().map(|(i, _)| i).collect()
}
