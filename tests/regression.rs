//! Fit-then-score checks across linear_model and metrics.

use coursework::metrics::{
    MetricsReport, adj_r2, mean_absolute_error, mean_squared_error, model_score,
    p_vals_per_coef, r2_score, root_mean_square_error,
};
use coursework::{LinearRegression, Matrix, Vector};
use ndarray::{Array, Axis, array, concatenate};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Normal, Uniform};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn noisy_line(samples: usize, seed: u64) -> (Matrix, Vector) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Matrix = Array::random_using((samples, 1), Uniform::new(-10.0, 10.0), &mut rng);
    let noise: Vector = Array::random_using(samples, Normal::new(0.0, 0.5).unwrap(), &mut rng);
    let y = &x.column(0) + &noise + 9.0;
    (x, y)
}

#[test]
fn reference_values() {
    assert_eq!(r2_score(&array![1.0, 2.0, 3.0], &array![1.0, 2.0, 3.0]).unwrap(), 1.0);
    assert_eq!(
        mean_squared_error(&array![1.0, 2.0, 3.0], &array![1.0, 2.0, 3.0]).unwrap(),
        0.0
    );
    assert_eq!(
        mean_absolute_error(&array![1.0, 2.0, 3.0, 4.0], &array![2.0, 2.0, 2.0, 2.0]).unwrap(),
        1.0
    );
    assert!((adj_r2(0.8, 10, 2) - 0.7428571428571429).abs() < 1e-12);
}

#[test]
fn fitted_line_scores_well() {
    let (x, y) = noisy_line(100, 7);

    let mut model = LinearRegression::new();
    model.fit(&x, &y).unwrap();
    let pred = model.predict(&x).unwrap();

    let coeffs = model.coefficients.as_ref().unwrap();
    assert!((coeffs[0] - 1.0).abs() < 0.05);
    assert!((model.intercept.unwrap() - 9.0).abs() < 0.2);

    let score = model_score(&y, &pred, &x, false).unwrap();
    assert!(score.r2 > 0.98);
    assert!(score.adj_r2 < score.r2);
    assert!((score.adj_r2 - adj_r2(score.r2, 100, 1)).abs() < 1e-15);

    let report = MetricsReport::compute(&y, &pred, &x).unwrap();
    assert_eq!(
        report.root_mean_squared_error,
        root_mean_square_error(&y, &pred).unwrap()
    );
    // noise has sd 0.5
    assert!(report.root_mean_squared_error > 0.3 && report.root_mean_squared_error < 0.7);
    assert!(report.standard_error_estimate > report.root_mean_squared_error);
}

#[test]
fn p_values_flag_real_effects_only() {
    let (x, y) = noisy_line(100, 11);

    let mut model = LinearRegression::new();
    model.fit(&x, &y).unwrap();
    let pred = model.predict(&x).unwrap();

    let design = concatenate(Axis(1), &[Matrix::ones((100, 1)).view(), x.view()]).unwrap();
    let coefs = array![model.intercept.unwrap(), model.coefficients.as_ref().unwrap()[0]];

    let p = p_vals_per_coef(&pred, &y, &coefs, &design).unwrap();
    assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)));
    assert!(p[0] < 1e-10);
    assert!(p[1] < 1e-10);

    // an irrelevant zero coefficient is indistinguishable from noise
    let coefs_null = array![model.intercept.unwrap(), 0.0];
    let p_null = p_vals_per_coef(&pred, &y, &coefs_null, &design).unwrap();
    assert!((p_null[1] - 1.0).abs() < 1e-9);
}
