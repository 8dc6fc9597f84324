//! Writes `sample_data.csv`: monthly auto-dealership sales that exercise every
//! filter control (text categories, low-cardinality numbers, dates, prices).

use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let dealerships = [("Northside Motors", "IL"), ("Bayview Auto", "CA"), ("Lone Star Cars", "TX")];
    // (make, model, base price)
    let models = [
        ("Ford", "F-150", 42_000.0),
        ("Ford", "Escape", 29_000.0),
        ("Toyota", "Camry", 27_500.0),
        ("Toyota", "RAV4", 31_000.0),
        ("Honda", "Civic", 24_000.0),
        ("Honda", "CR-V", 30_500.0),
    ];
    let years = [2019, 2020, 2021, 2022];
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid start date")?;

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Date", "Dealership", "State", "Make", "Model", "Year", "Price", "Units Sold", "Certified",
    ])?;

    let mut rows = 0usize;
    for month in 0..24u32 {
        let date = start
            .checked_add_months(Months::new(month))
            .context("date out of range")?;
        for &(dealership, state) in &dealerships {
            for _ in 0..4 {
                let &(make, model, base) = rng.pick(&models);
                let year = *rng.pick(&years);
                let age_discount = (2022 - year) as f64 * 1_500.0;
                let price = (base - age_discount + rng.gauss(0.0, 1_200.0)).round();
                let units = 1 + rng.next_u64() % 12;
                let certified = rng.next_f64() < 0.3;

                // Leave a few prices blank so the dataset has missing values.
                let price_cell = if rng.next_f64() < 0.02 {
                    String::new()
                } else {
                    format!("{price:.2}")
                };

                writer.write_record([
                    date.format("%Y-%m-%d").to_string(),
                    dealership.to_string(),
                    state.to_string(),
                    make.to_string(),
                    model.to_string(),
                    year.to_string(),
                    price_cell,
                    units.to_string(),
                    certified.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush().with_context(|| format!("flushing {output_path}"))?;

    println!("Wrote {rows} sales records to {output_path}");
    Ok(())
}
