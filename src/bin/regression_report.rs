//! Fits a line to noisy synthetic data and prints its fit statistics.
//!
//! Data follows `y = x + N(0, 0.5) + 9` with `x ~ U(-10, 10)`.

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser};
use coursework::logging::init_logging;
use coursework::metrics::{model_score, p_vals_per_coef};
use coursework::{LinearRegression, Matrix, Vector};
use ndarray::{Array, Axis, concatenate};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "regression_report",
    version,
    about = "Score a least-squares fit on synthetic data"
)]
struct Cli {
    /// Number of observations to generate
    #[arg(long, default_value_t = 100)]
    samples: usize,

    /// Seed for the data generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Increase log verbosity on stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn synthetic_data(samples: usize, seed: u64) -> Result<(Matrix, Vector)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Matrix = Array::random_using((samples, 1), Uniform::new(-10.0, 10.0), &mut rng);
    let noise_dist = Normal::new(0.0, 0.5).map_err(|e| anyhow!("noise distribution: {}", e))?;
    let noise: Vector = Array::random_using(samples, noise_dist, &mut rng);

    let y = &x.column(0) + &noise + 9.0;
    Ok((x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.samples < 3 {
        return Err(anyhow!("need at least 3 samples, got {}", cli.samples));
    }

    let (x, y) = synthetic_data(cli.samples, cli.seed)?;
    info!(samples = cli.samples, seed = cli.seed, "generated data");

    let mut model = LinearRegression::new();
    model.fit(&x, &y)?;
    let predictions = model.predict(&x)?;

    let score = model_score(&y, &predictions, &x, true)?;
    info!(r2 = score.r2, adj_r2 = score.adj_r2, "scored fit");

    let coefficients = model
        .coefficients
        .as_ref()
        .ok_or_else(|| anyhow!("model has no coefficients after fit"))?;
    let intercept = model.intercept.unwrap_or(0.0);

    // intercept as an explicit column so it gets a p-value too
    let design = concatenate(Axis(1), &[Matrix::ones((x.nrows(), 1)).view(), x.view()])?;
    let mut coefs = Vector::zeros(coefficients.len() + 1);
    coefs[0] = intercept;
    coefs.slice_mut(ndarray::s![1..]).assign(coefficients);

    let p_values = p_vals_per_coef(&predictions, &y, &coefs, &design)?;

    println!();
    println!("{:<12} {:>12} {:>12}", "term", "estimate", "p-value");
    for (i, (coef, p)) in coefs.iter().zip(p_values.iter()).enumerate() {
        let name = if i == 0 {
            "intercept".to_string()
        } else {
            format!("x{}", i - 1)
        };
        println!("{:<12} {:>12.4} {:>12.3e}", name, coef, p);
    }

    Ok(())
}
