//! Recursive radix-2 FFT.
//!
//! Splits the input by index parity, transforms both halves and recombines
//! them with twiddle factors `e^{-2πik/n}`. Input length must be a power of
//! two; a single sample is its own transform.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Magnitude.
    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    fn scale(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

/// Forward transform.
///
/// # Errors
///
/// [`ConfigError`] if `input` is empty or its length is not a power of two.
pub fn fft(input: &[Complex]) -> Result<Vec<Complex>, ConfigError> {
    check_len(input.len())?;
    Ok(transform(input))
}

/// Inverse transform, scaled by `1/n` so that `ifft(fft(x)) ≈ x`.
pub fn ifft(input: &[Complex]) -> Result<Vec<Complex>, ConfigError> {
    check_len(input.len())?;
    let conjugated: Vec<Complex> = input.iter().map(|c| c.conj()).collect();
    let scale = 1.0 / input.len() as f64;
    Ok(transform(&conjugated)
        .into_iter()
        .map(|c| c.conj().scale(scale))
        .collect())
}

fn check_len(len: usize) -> Result<(), ConfigError> {
    if len == 0 || !len.is_power_of_two() {
        return Err(ConfigError::new(format!(
            "fft length must be a power of two, got {len}"
        )));
    }
    Ok(())
}

fn transform(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    if n == 1 {
        return vec![input[0]];
    }

    let even: Vec<Complex> = input.iter().step_by(2).copied().collect();
    let odd: Vec<Complex> = input.iter().skip(1).step_by(2).copied().collect();
    let even = transform(&even);
    let odd = transform(&odd);

    let half = n / 2;
    let mut out = vec![Complex::ZERO; n];
    for (k, (&e, &o)) in even.iter().zip(&odd).enumerate() {
        let twiddle = Complex::from_polar(1.0, -2.0 * PI * k as f64 / n as f64) * o;
        out[k] = e + twiddle;
        out[k + half] = e - twiddle;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Complex, b: Complex) -> bool {
        (a - b).norm() < EPS
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(fft(&[]).is_err());
        assert!(fft(&[Complex::ZERO; 3]).is_err());
        assert!(ifft(&[Complex::ZERO; 6]).is_err());
    }

    #[test]
    fn single_sample_is_identity() {
        let x = [Complex::new(2.5, -1.0)];
        assert_eq!(fft(&x).unwrap(), x.to_vec());
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut x = vec![Complex::ZERO; 8];
        x[0] = Complex::from(1.0);
        let spectrum = fft(&x).unwrap();
        assert!(spectrum.iter().all(|&c| close(c, Complex::from(1.0))));
    }

    #[test]
    fn known_four_point_transform() {
        let x: Vec<Complex> = [1.0, 2.0, 3.0, 4.0].into_iter().map(Complex::from).collect();
        let expected = [
            Complex::new(10.0, 0.0),
            Complex::new(-2.0, 2.0),
            Complex::new(-2.0, 0.0),
            Complex::new(-2.0, -2.0),
        ];
        let spectrum = fft(&x).unwrap();
        for (got, want) in spectrum.iter().zip(expected) {
            assert!(close(*got, want), "{got:?} != {want:?}");
        }
    }

    #[test]
    fn inverse_recovers_input() {
        let x: Vec<Complex> = (0..16)
            .map(|i| Complex::new((i as f64).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let back = ifft(&fft(&x).unwrap()).unwrap();
        assert!(x.iter().zip(&back).all(|(a, b)| close(*a, *b)));
    }

    #[test]
    fn complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert!((Complex::new(3.0, 4.0).norm() - 5.0).abs() < EPS);
        assert!(close(Complex::from_polar(2.0, PI / 2.0), Complex::new(0.0, 2.0)));
    }
}
