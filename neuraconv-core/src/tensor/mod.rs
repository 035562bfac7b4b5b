// src/tensor/mod.rs

use crate::error::NeuraConvError;
use std::fmt;

pub mod create;
pub mod utils;

// Re-export creation functions to make them public
pub use create::{full, ones, rand_uniform, randn, zeros, zeros_like};

/// A dense, contiguous, row-major `f32` tensor.
///
/// Convolution code reads tensors as NHWC: activations are
/// `(batch, height, width, channel)`, kernels `(kernel_h, kernel_w, in, out)`
/// and biases `(1, 1, 1, out)`. The tensor itself is rank-agnostic.
///
/// Unlike a graph-tracking tensor this one is a plain owned value: cloning copies
/// the buffer, and every forward/backward call hands back freshly allocated
/// tensors owned by the caller.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Tensor {
    /// Creates a new Tensor from flat row-major data and a shape.
    ///
    /// Fails with `TensorCreationError` if `data_vec.len()` is not the product of `shape`,
    /// and with `InvalidArgument` if that product overflows.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, NeuraConvError> {
        let numel = utils::checked_numel(&shape)?;
        if data_vec.len() != numel {
            return Err(NeuraConvError::TensorCreationError {
                data_len: data_vec.len(),
                shape,
            });
        }
        let strides = utils::calculate_strides(&shape);
        Ok(Tensor {
            data: data_vec,
            shape,
            strides,
        })
    }

    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Flat view of the underlying buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Copies the buffer out as a `Vec<f32>`.
    pub fn get_f32_data(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Converts a multi-dimensional index into an offset into the flat buffer.
    pub fn offset(&self, index: &[usize]) -> Result<usize, NeuraConvError> {
        if index.len() != self.shape.len()
            || index.iter().zip(self.shape.iter()).any(|(&i, &d)| i >= d)
        {
            return Err(NeuraConvError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(index
            .iter()
            .zip(self.strides.iter())
            .map(|(i, s)| i * s)
            .sum())
    }

    /// Reads the element at a multi-dimensional index.
    pub fn at(&self, index: &[usize]) -> Result<f32, NeuraConvError> {
        let offset = self.offset(index)?;
        Ok(self.data[offset])
    }

    /// Mutable access to the element at a multi-dimensional index.
    pub fn at_mut(&mut self, index: &[usize]) -> Result<&mut f32, NeuraConvError> {
        let offset = self.offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// Applies `f` to every element, returning a tensor of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Tensor {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Combines two same-shape tensors elementwise.
    ///
    /// No broadcasting: a shape difference fails with `ShapeMismatch` tagged with `operation`.
    pub fn zip_map(
        &self,
        other: &Tensor,
        operation: &str,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Tensor, NeuraConvError> {
        if self.shape != other.shape {
            return Err(NeuraConvError::shape_mismatch(
                self.shape.clone(),
                other.shape.clone(),
                operation,
            ));
        }
        Ok(Tensor {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        })
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        let preview: Vec<f32> = self.data.iter().take(PREVIEW).copied().collect();
        let ellipsis = if self.data.len() > PREVIEW { ", .." } else { "" };
        write!(
            f,
            "Tensor(shape={:?}, data={:?}{})",
            self.shape, preview, ellipsis
        )
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
