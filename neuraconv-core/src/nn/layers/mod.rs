// src/nn/layers/mod.rs

pub mod conv2d;

// Re-export key layer structs
pub use conv2d::{Conv2d, Conv2dConfig, Conv2dGradients};
