// src/nn/init.rs

//! Weight-initialization presets for convolution kernels.
//!
//! Every function draws from a caller-supplied RNG so tests (and users who need
//! reproducible runs) can pass a seeded `StdRng`.

use crate::error::NeuraConvError;
use crate::tensor::{rand_uniform, randn, zeros, Tensor};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Scale applied to N(0, 1) samples by the `random` preset.
pub const RANDOM_INIT_SCALE: f32 = 0.01;

/// How a layer's kernel is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InitMethod {
    /// N(0, 1) * 0.01
    #[default]
    Random,
    /// U[-s, s] with s = sqrt(6 / (in_channels + out_channels))
    Xavier,
    /// N(0, 1) * sqrt(2 / in_channels)
    He,
}

impl InitMethod {
    pub fn name(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Xavier => "xavier",
            InitMethod::He => "he",
        }
    }

    /// Draws a kernel of `shape` for a layer mapping `in_channels` to `out_channels`.
    pub fn initialize<R: Rng + ?Sized>(
        &self,
        shape: &[usize],
        in_channels: usize,
        out_channels: usize,
        rng: &mut R,
    ) -> Result<Tensor, NeuraConvError> {
        match self {
            InitMethod::Random => random_normal(shape, RANDOM_INIT_SCALE, rng),
            InitMethod::Xavier => xavier_uniform(shape, in_channels, out_channels, rng),
            InitMethod::He => he_normal(shape, in_channels, rng),
        }
    }
}

impl FromStr for InitMethod {
    type Err = NeuraConvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(InitMethod::Random),
            "xavier" => Ok(InitMethod::Xavier),
            "he" => Ok(InitMethod::He),
            other => Err(NeuraConvError::InvalidArgument(format!(
                "Invalid initialization method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for InitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// N(0, 1) samples multiplied by `scale`.
pub fn random_normal<R: Rng + ?Sized>(
    shape: &[usize],
    scale: f32,
    rng: &mut R,
) -> Result<Tensor, NeuraConvError> {
    Ok(randn(shape, rng)?.map(|x| x * scale))
}

/// Glorot/Xavier uniform. Note the bound uses channel counts only, not the
/// receptive-field size.
pub fn xavier_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    in_channels: usize,
    out_channels: usize,
    rng: &mut R,
) -> Result<Tensor, NeuraConvError> {
    let fan_sum = in_channels + out_channels;
    if fan_sum == 0 {
        return Err(NeuraConvError::InvalidArgument(
            "xavier init needs at least one channel".to_string(),
        ));
    }
    let bound = (6.0 / fan_sum as f32).sqrt();
    rand_uniform(shape, -bound, bound, rng)
}

/// Kaiming/He normal, scaled by sqrt(2 / in_channels).
pub fn he_normal<R: Rng + ?Sized>(
    shape: &[usize],
    in_channels: usize,
    rng: &mut R,
) -> Result<Tensor, NeuraConvError> {
    if in_channels == 0 {
        return Err(NeuraConvError::InvalidArgument(
            "he init needs in_channels > 0".to_string(),
        ));
    }
    random_normal(shape, (2.0 / in_channels as f32).sqrt(), rng)
}

/// All-zero bias of shape `(1, 1, 1, out_channels)`.
pub fn zero_bias(out_channels: usize) -> Result<Tensor, NeuraConvError> {
    zeros(&[1, 1, 1, out_channels])
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests; // Link to the test file
