// neuraconv-core/src/optim/mod.rs

//! Optimizers for training neural networks.
//!
//! This module provides the `Optimizer` trait, the `LayerRegistry` an optimizer
//! uses to look up a layer's current parameters by name, and a plain
//! gradient-descent implementation.

// Declare modules within the optim crate
pub mod gradient_descent;
pub mod optimizer_trait;
pub mod registry;

// Re-export key items for easier access
pub use gradient_descent::GradientDescent;
pub use optimizer_trait::Optimizer;
pub use registry::{LayerEntry, LayerRegistry};
