//! Writes a deterministic `sample.csv` so the tool can be tried without
//! external data:
//!
//! ```text
//! cargo run --bin generate_sample
//! cargo run -- sample.csv temperature --ma-window 7 --hist
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid start date");
    let days = 120i64;

    let mut writer = csv::Writer::from_path("sample.csv").context("creating sample.csv")?;
    writer
        .write_record(["date", "temperature", "station"])
        .context("writing header")?;

    for day in 0..days {
        let date = start + Duration::days(day);
        // Slow seasonal swing plus per-day noise.
        let seasonal = 12.0 + 8.0 * (day as f64 / days as f64 * std::f64::consts::PI).sin();
        let temperature = seasonal + rng.gauss(0.0, 1.2);
        let station = if day % 2 == 0 { "north" } else { "south" };
        writer
            .write_record([
                date.format("%Y-%m-%d").to_string(),
                format!("{temperature:.2}"),
                station.to_string(),
            ])
            .with_context(|| format!("writing row {day}"))?;
    }

    writer.flush().context("flushing sample.csv")?;
    println!("wrote sample.csv ({days} rows)");
    Ok(())
}
