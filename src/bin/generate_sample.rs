use std::path::PathBuf;

use anyhow::{Context, Result};
use railway_dashboard::data::model::TicketRecord;
use railway_dashboard::data::stations::UK_STATIONS;

/// Stations that are deliberately missing from the coordinate table, so the
/// map shows what an unmatched name looks like.
const UNMAPPED_STATIONS: [&str; 3] = ["Leeds", "Crewe", "Durham"];

const PURCHASE_TYPES: [&str; 2] = ["Online", "Station"];

/// (class, base fare multiplier)
const TICKET_CLASSES: [(&str, f64); 2] = [("Standard", 1.0), ("First Class", 2.4)];

/// (status, cumulative probability)
const STATUSES: [(&str, f64); 3] = [("On Time", 0.86), ("Delayed", 0.95), ("Cancelled", 1.0)];

const ROWS: usize = 2000;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
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
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("railway.csv"));

    let mut rng = SimpleRng::new(42);

    let stations: Vec<&str> = UK_STATIONS
        .iter()
        .map(|s| s.name)
        .chain(UNMAPPED_STATIONS)
        .collect();

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    for _ in 0..ROWS {
        let departure = *rng.pick(&stations);
        let mut arrival = *rng.pick(&stations);
        while arrival == departure {
            arrival = *rng.pick(&stations);
        }
        let (class, multiplier) = *rng.pick(&TICKET_CLASSES);
        let fare = (rng.gauss(35.0, 18.0).max(3.0) * multiplier).round();

        let roll = rng.next_f64();
        let status = STATUSES
            .iter()
            .find(|(_, p)| roll < *p)
            .map_or("On Time", |(s, _)| *s);

        writer.serialize(TicketRecord {
            purchase_type: Some(rng.pick(&PURCHASE_TYPES).to_string()),
            ticket_class: Some(class.to_string()),
            departure_station: Some(departure.to_string()),
            arrival_destination: Some(arrival.to_string()),
            price: Some(fare),
            journey_status: Some(status.to_string()),
        })?;
    }
    writer.flush()?;

    println!("Wrote {ROWS} ticket records to {}", output_path.display());
    Ok(())
}
