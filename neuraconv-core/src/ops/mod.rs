// src/ops/mod.rs

//! Stateless tensor operations: elementwise activations and NHWC spatial padding.

pub mod activation;
pub mod padding;
