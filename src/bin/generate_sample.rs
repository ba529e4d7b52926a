use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic OpenFOAM `residuals.dat` for trying out the viewer.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Output file
    #[arg(default_value = "residuals.dat")]
    output: PathBuf,

    /// Number of solver iterations to write
    #[arg(long, default_value_t = 500)]
    iterations: u32,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Deterministic splitmix64 generator.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[-1, 1)`.
    fn next_signed(&mut self) -> f64 {
        ((self.next_u64() >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}

/// Field name, initial residual, decades lost per 100 iterations.
const FIELDS: [(&str, f64, f64); 6] = [
    ("p", 1.0, 0.9),
    ("Ux", 1.0, 1.3),
    ("Uy", 0.8, 1.2),
    ("k", 0.5, 1.0),
    ("epsilon", 0.4, 1.1),
    ("nuTilda", 0.6, 0.8),
];

fn residual(initial: f64, decay: f64, iteration: u32, noise: f64) -> f64 {
    let decades = decay * iteration as f64 / 100.0;
    // Converged solvers flatten out around 1e-6.
    (initial * 10f64.powf(-decades)).max(1e-6) * 10f64.powf(0.15 * noise)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SplitMix64(args.seed);

    let mut out = String::new();
    writeln!(out, "# Residuals")?;
    write!(out, "# {:<8}", "Time")?;
    for (name, _, _) in FIELDS {
        write!(out, "{name:<16}")?;
    }
    // 2-D case: the solver reports Uz but never solves for it.
    writeln!(out, "{:<16}", "Uz")?;

    for iteration in 1..=args.iterations {
        write!(out, "{iteration:<10}")?;
        for (_, initial, decay) in FIELDS {
            let value = residual(initial, decay, iteration, rng.next_signed());
            write!(out, "{value:<16.6e}")?;
        }
        writeln!(out, "{:<16}", "N/A")?;
    }

    std::fs::write(&args.output, out)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} iterations of {} residual fields to {}",
        args.iterations,
        FIELDS.len(),
        args.output.display()
    );
    Ok(())
}
