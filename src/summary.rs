use anyhow::Result;

use crate::{config::Config, map::format_duration, ping, track};

pub fn run(config: &Config) -> Result<()> {
    let pings = ping::load(&config.csv_path)?;
    let days = track::group_by_day(&pings);

    for day in &days {
        let (tracked, longest) = totals(&day.stay_minutes);
        println!(
            "{}: {} pings, {} tracked, longest stay {}",
            day.day,
            day.pings.len(),
            format_duration(Some(tracked)),
            format_duration(longest)
        );
    }
    println!("{} pings over {} days", pings.len(), days.len());

    Ok(())
}

/// Total tracked minutes of a day and its longest known stay.
fn totals(stay_minutes: &[Option<f64>]) -> (f64, Option<f64>) {
    let tracked = stay_minutes.iter().flatten().sum();
    let longest = stay_minutes.iter().flatten().copied().reduce(f64::max);
    (tracked, longest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_skip_unknown_gaps() {
        let (tracked, longest) = totals(&[Some(30.0), Some(240.0), None]);
        assert_eq!(tracked, 270.0);
        assert_eq!(longest, Some(240.0));
    }

    #[test]
    fn a_day_without_known_gaps() {
        let (tracked, longest) = totals(&[None]);
        assert_eq!(tracked, 0.0);
        assert_eq!(longest, None);
    }
}
