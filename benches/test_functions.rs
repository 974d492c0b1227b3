//! Standard optimization test functions for benchmarking.

/// Sphere function: unimodal, convex. Global minimum f(0,...,0) = 0.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Rosenbrock function: narrow valley. Global minimum f(1,...,1) = 0.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
        .sum()
}

/// Rastrigin function: highly multimodal. Global minimum f(0,...,0) = 0.
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * std::f64::consts::PI * xi).cos())
            .sum::<f64>()
}

/// Ackley function: nearly flat with a deep well. Global minimum f(0,...,0) = 0.
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x
        .iter()
        .map(|xi| (2.0 * std::f64::consts::PI * xi).cos())
        .sum();
    -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + std::f64::consts::E
}

/// ZDT1 (two objectives, `x` in `[0, 1]^n`). The Pareto front is
/// `x[1..] = 0`, where `f2 = 1 - sqrt(f1)`.
pub fn zdt1(x: &[f64]) -> Vec<f64> {
    let f1 = x[0];
    let tail = &x[1..];
    let g = 1.0 + 9.0 * tail.iter().sum::<f64>() / tail.len().max(1) as f64;
    vec![f1, g * (1.0 - (f1 / g).sqrt())]
}

/// Schaffer's first problem (one variable, two objectives). Every `x` in
/// `[0, 2]` is Pareto-optimal.
pub fn schaffer(x: &[f64]) -> Vec<f64> {
    vec![x[0] * x[0], (x[0] - 2.0).powi(2)]
}
