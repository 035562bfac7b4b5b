// src/tensor/create.rs

use crate::error::NeuraConvError;
use crate::tensor::utils::checked_numel;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, NeuraConvError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, NeuraConvError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, NeuraConvError> {
    let numel = checked_numel(shape)?;
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, NeuraConvError> {
    zeros(&tensor.shape())
}

/// Samples every element from the standard normal distribution N(0, 1).
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Result<Tensor, NeuraConvError> {
    let numel = checked_numel(shape)?;
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Samples every element uniformly from the closed interval `[low, high]`.
pub fn rand_uniform<R: Rng + ?Sized>(
    shape: &[usize],
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Tensor, NeuraConvError> {
    if !(low.is_finite() && high.is_finite()) || low > high {
        return Err(NeuraConvError::InvalidArgument(format!(
            "Invalid uniform range [{}, {}]",
            low, high
        )));
    }
    let numel = checked_numel(shape)?;
    let dist = Uniform::new_inclusive(low, high);
    let data_vec: Vec<f32> = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
