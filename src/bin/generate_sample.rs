use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use film_dash::data::export::save_films;
use film_dash::data::model::Film;

/// Write a synthetic film dataset (.json, .csv or .parquet) for trying out the dashboard.
#[derive(Debug, Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output file; the extension picks the format.
    #[arg(default_value = "sample_films.json")]
    output: PathBuf,

    /// Number of films to generate.
    #[arg(long, default_value_t = 60)]
    count: usize,

    /// Seed for the deterministic generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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

const ADJECTIVES: [&str; 12] = [
    "Frozen", "Infinite", "Silent", "Crimson", "Last", "Hidden", "Electric", "Lost", "Golden",
    "Midnight", "Savage", "Eternal",
];
const NOUNS: [&str; 12] = [
    "Kingdom", "Horizon", "Empire", "Voyage", "Legacy", "Frontier", "Storm", "Protocol", "Galaxy",
    "Harbor", "Requiem", "Circuit",
];
const DIRECTORS: [&str; 8] = [
    "Ava Lindqvist", "Marco Bellini", "Hiro Tanaka", "Chloé Marchand", "Samuel Okafor",
    "Lena Kowalski", "Diego Ruiz", "Priya Nair",
];
/// Weighted: the United States appears most often, as in the real list.
const COUNTRIES: [&str; 10] = [
    "United States", "United States", "United States", "United States", "United Kingdom",
    "China", "France", "Japan", "New Zealand", "Canada",
];

fn generate_films(count: usize, rng: &mut SimpleRng) -> Vec<Film> {
    (0..count)
        .map(|i| {
            let title = format!("The {} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS));
            let title = if i >= ADJECTIVES.len() * 2 && i % 3 == 0 {
                format!("{title} {}", i / 10 + 2)
            } else {
                title
            };
            // Every 25th record lacks a year, like gaps in scraped data.
            let release_year = (i % 25 != 24).then(|| 1975 + (rng.next_u64() % 49) as i32);
            let box_office = rng.gauss(20.0, 0.6).exp().round().clamp(1.0e8, 3.0e9);
            Film {
                title,
                release_year,
                director: rng.pick(&DIRECTORS).to_string(),
                box_office: Some(box_office),
                country: rng.pick(&COUNTRIES).to_string(),
            }
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let films = generate_films(args.count, &mut rng);
    save_films(&films, &args.output)?;

    println!("Wrote {} films to {}", films.len(), args.output.display());
    Ok(())
}
