// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Elementwise non-linearities with a forward transform and a backward rule.
//! The backward rule always recomputes what it needs from the pre-activation
//! input `Z`; nothing is cached between the two passes.
//!
//! ## Currently Implemented:
//! - [`Sigmoid`](Activation::Sigmoid)
//! - [`Relu`](Activation::Relu): Rectified Linear Unit.
//! - [`Tanh`](Activation::Tanh)
//! - [`Linear`](Activation::Linear): identity.

pub mod linear;
pub mod relu;
pub mod sigmoid;
pub mod tanh;

use crate::error::NeuraConvError;
use crate::tensor::Tensor;
use std::fmt;
use std::str::FromStr;

// Re-export key functions
pub use linear::{linear_backward_op, linear_op};
pub use relu::{relu_backward_op, relu_op};
pub use sigmoid::{sigmoid_backward_op, sigmoid_op};
pub use tanh::{tanh_backward_op, tanh_op};

/// Signature shared by every activation's backward rule: `(dA, Z) -> dZ`.
pub type ActivationBackwardFn = fn(&Tensor, &Tensor) -> Result<Tensor, NeuraConvError>;

/// The closed set of supported activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    Sigmoid,
    Relu,
    Tanh,
    Linear,
}

impl Activation {
    /// Name accepted by [`get_activation`].
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Linear => "linear",
        }
    }

    /// `A = f(Z)`, same shape as `z`.
    pub fn forward(&self, z: &Tensor) -> Tensor {
        match self {
            Activation::Sigmoid => sigmoid_op(z),
            Activation::Relu => relu_op(z),
            Activation::Tanh => tanh_op(z),
            Activation::Linear => linear_op(z),
        }
    }

    /// `dZ` from the upstream gradient `da` and the pre-activation `z`.
    ///
    /// # Errors
    /// `ShapeMismatch` if `da` and `z` have different shapes.
    pub fn backward(&self, da: &Tensor, z: &Tensor) -> Result<Tensor, NeuraConvError> {
        (self.backward_fn())(da, z)
    }

    pub fn backward_fn(&self) -> ActivationBackwardFn {
        match self {
            Activation::Sigmoid => sigmoid_backward_op,
            Activation::Relu => relu_backward_op,
            Activation::Tanh => tanh_backward_op,
            Activation::Linear => linear_backward_op,
        }
    }
}

impl FromStr for Activation {
    type Err = NeuraConvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::Relu),
            "tanh" => Ok(Activation::Tanh),
            "linear" => Ok(Activation::Linear),
            other => Err(NeuraConvError::InvalidArgument(format!(
                "Activation function '{}' not supported",
                other
            ))),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the activation named `name` together with its backward rule.
///
/// Recognized names are exactly `sigmoid`, `relu`, `tanh` and `linear`.
///
/// # Errors
/// `InvalidArgument` for any other string.
pub fn get_activation(name: &str) -> Result<(Activation, ActivationBackwardFn), NeuraConvError> {
    let activation: Activation = name.parse()?;
    log::trace!("Resolved activation '{}'", activation);
    Ok((activation, activation.backward_fn()))
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
