//! Writes a FOIL-shaped sample CSV to `data/uber-jan-feb-foil.csv` so the
//! dashboard has something to show out of the box.
//!
//! Usage: `cargo run --bin generate_sample`

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

#[derive(Serialize)]
struct Row {
    date: NaiveDate,
    dispatching_base_number: &'static str,
    active_vehicles: u32,
    trips: u32,
}

/// The six dispatching bases of the original Jan–Feb 2015 FOIL release,
/// with a rough fleet-size factor each.
const BASES: [(&str, f64); 6] = [
    ("B02512", 0.6),
    ("B02598", 1.4),
    ("B02617", 1.8),
    ("B02682", 1.6),
    ("B02764", 5.0),
    ("B02765", 0.5),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Demand multiplier for a weekday: weekends run hotter, Mondays quietest.
fn day_factor(day: Weekday) -> f64 {
    match day {
        Weekday::Mon => 0.85,
        Weekday::Tue => 0.90,
        Weekday::Wed => 0.95,
        Weekday::Thu => 1.05,
        Weekday::Fri => 1.20,
        Weekday::Sat => 1.30,
        Weekday::Sun => 1.10,
    }
}

fn main() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2015, 2, 28).unwrap();

    std::fs::create_dir_all("data").context("creating data directory")?;
    let mut writer =
        csv::Writer::from_path("data/uber-jan-feb-foil.csv").context("creating sample CSV")?;

    let mut rng = SimpleRng::new(42);
    let mut n_rows = 0usize;

    let mut date = start;
    while date <= end {
        // Slow upward trend over the two months.
        let day_index = (date - start).num_days() as f64;
        let trend = 1.0 + 0.004 * day_index;

        for (base, size) in BASES {
            let noise = 0.85 + 0.3 * rng.uniform();
            let vehicles = (220.0 * size * day_factor(date.weekday()) * noise).round() as u32;
            // Roughly 7 trips per active vehicle, with its own jitter.
            let per_vehicle = 6.5 + rng.uniform();
            let trips = (f64::from(vehicles) * per_vehicle * trend).round() as u32;

            writer
                .serialize(Row {
                    date,
                    dispatching_base_number: base,
                    active_vehicles: vehicles,
                    trips,
                })
                .context("writing row")?;
            n_rows += 1;
        }
        date = date + Duration::days(1);
    }

    writer.flush().context("flushing sample CSV")?;
    println!("Wrote {n_rows} rows to data/uber-jan-feb-foil.csv");
    Ok(())
}
