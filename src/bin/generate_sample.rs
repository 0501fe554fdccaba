use anyhow::{Context, Result};
use natality_dashboard::config::DATA_FILE;

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

/// (state, approximate births per month)
const STATES: [(&str, f64); 12] = [
    ("Alabama", 4_800.0),
    ("Arizona", 6_600.0),
    ("California", 34_500.0),
    ("Colorado", 5_200.0),
    ("Florida", 18_400.0),
    ("Georgia", 10_500.0),
    ("Illinois", 10_700.0),
    ("New York", 17_600.0),
    ("Ohio", 10_600.0),
    ("Pennsylvania", 10_800.0),
    ("Texas", 31_800.0),
    ("Washington", 6_900.0),
];

/// Share of births that are male.
const MALE_SHARE: f64 = 0.512;

/// One in this many births cells is written as "Suppressed".
const SUPPRESSION_RATE: u64 = 97;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(2025);

    let mut writer = csv::Writer::from_path(DATA_FILE)
        .with_context(|| format!("creating {DATA_FILE}"))?;
    writer.write_record([
        "Year",
        "Month",
        "State of Residence",
        "Sex of Infant",
        "Births",
    ])?;

    let mut rows = 0usize;
    let mut suppressed = 0usize;
    for month in 1..=12u32 {
        // Mild seasonality: late summer peaks.
        let season = 1.0 + 0.06 * ((month as f64 - 8.0) * std::f64::consts::PI / 6.0).cos();

        for &(state, base) in &STATES {
            for (sex, share) in [("F", 1.0 - MALE_SHARE), ("M", MALE_SHARE)] {
                let mean = base * season * share;
                let births = rng.gauss(mean, mean * 0.03).max(0.0).round();

                let cell = if rng.next_u64() % SUPPRESSION_RATE == 0 {
                    suppressed += 1;
                    "Suppressed".to_string()
                } else {
                    format!("{births:.0}")
                };

                writer.write_record([
                    "2025".to_string(),
                    month.to_string(),
                    state.to_string(),
                    sex.to_string(),
                    cell,
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} rows ({suppressed} suppressed) to {DATA_FILE}");
    Ok(())
}
