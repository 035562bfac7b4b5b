// src/nn/mod.rs
// Layers, their learnable parameters and the weight-initialization presets.

pub mod init;
pub mod layers;
pub mod module; // Trait Module
pub mod pair; // Scalar-or-pair spatial hyper-parameters
pub mod parameter; // struct Parameter

// Re-export common items
pub use init::InitMethod;
pub use layers::conv2d::Conv2d;
pub use module::Module;
pub use pair::Pair2d;
pub use parameter::Parameter;
