//! # NeuraConv core
//!
//! A small neural-network layer toolkit: a dense NHWC `Tensor`, elementwise
//! activations, a direct 2-D convolution layer with forward/backward passes, and
//! a gradient-descent optimizer that updates layers through an explicit
//! [`optim::LayerRegistry`].

pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod utils;

pub use error::NeuraConvError;
pub use tensor::Tensor;

pub use nn::layers::conv2d::{Conv2d, Conv2dConfig, Conv2dGradients};
pub use ops::activation::{get_activation, Activation};
pub use optim::{GradientDescent, LayerRegistry, Optimizer};
