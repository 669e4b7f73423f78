//! Sample statistics and random variates.

use std::f64::consts::PI;

use rand::Rng;
use rand::distr::Uniform;

use crate::error::ConfigError;

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with an `n - 1` denominator; `0.0` for fewer than two
/// values.
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Draws from the half-open interval `[a, b)`.
///
/// # Errors
///
/// [`ConfigError`] unless both bounds are finite, `a < b`, and the width
/// `b - a` is itself finite.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> Result<f64, ConfigError> {
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(ConfigError::new(format!(
            "uniform bounds must be finite with a < b, got [{a}, {b})"
        )));
    }
    let dist = Uniform::new(a, b).map_err(|err| {
        ConfigError::new(format!("uniform range [{a}, {b}) is unusable: {err}"))
    })?;
    Ok(rng.sample(dist))
}

/// Draws from `N(mu, sigma²)` with the Box–Muller transform.
///
/// # Errors
///
/// [`ConfigError`] if `mu` is not finite or `sigma` is negative or not
/// finite.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> Result<f64, ConfigError> {
    if !mu.is_finite() || !(sigma.is_finite() && sigma >= 0.0) {
        return Err(ConfigError::new(format!(
            "gaussian needs finite mu and sigma >= 0, got mu={mu} sigma={sigma}"
        )));
    }
    let u1 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    Ok(mu + sigma * z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn mean_and_variance() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&xs), 5.0);
        assert!((variance(&xs) - 32.0 / 7.0).abs() < 1e-12);
        assert!((std_dev(&xs) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.0]), 0.0);
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let x = uniform(&mut rng, -2.0, 3.0).unwrap();
            assert!((-2.0..3.0).contains(&x));
        }
        assert!(uniform(&mut rng, 1.0, 1.0).is_err());
        assert!(uniform(&mut rng, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn uniform_rejects_overflowing_width() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(uniform(&mut rng, -f64::MAX, f64::MAX).is_err());
        assert!(uniform(&mut rng, -1e308, 1e308).is_err());
        let x = uniform(&mut rng, -1e307, 1e307).unwrap();
        assert!((-1e307..1e307).contains(&x));
    }

    #[test]
    fn gaussian_moments_match_parameters() {
        let mut rng = SmallRng::seed_from_u64(7);
        let samples: Vec<f64> = (0..20_000)
            .map(|_| gaussian(&mut rng, 10.0, 2.0).unwrap())
            .collect();
        assert!((mean(&samples) - 10.0).abs() < 0.1);
        assert!((std_dev(&samples) - 2.0).abs() < 0.1);
    }

    #[test]
    fn gaussian_rejects_bad_sigma() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(gaussian(&mut rng, 0.0, -1.0).is_err());
        assert!(gaussian(&mut rng, f64::NAN, 1.0).is_err());
        assert_eq!(gaussian(&mut rng, 4.0, 0.0).unwrap(), 4.0);
    }
}
