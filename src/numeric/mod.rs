//! Small numeric helpers: dense matrices, radix-2 FFT and sample statistics.
//!
//! These are stateless leaf utilities; none of them touch the slot arena.

pub mod fft;
pub mod matrix;
pub mod stats;

pub use fft::{Complex, fft, ifft};
pub use matrix::Matrix;
pub use stats::{gaussian, mean, std_dev, uniform, variance};
