use crate::error::NeuraConvError;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;
use std::sync::{Arc, RwLock};

/// The base trait for layers that can be registered with an optimizer.
///
/// A module has a stable `name` which is the key an optimizer's
/// [`LayerRegistry`](crate::optim::LayerRegistry) uses to find its parameters.
pub trait Module: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass of the module.
    fn forward(&self, input: &Tensor) -> Result<Tensor, NeuraConvError>;

    /// Unique identifier of this module within a registry.
    fn name(&self) -> &str;

    /// Shared handles to the learnable parameters, in a fixed order.
    ///
    /// Gradients handed to an optimizer for this module must follow the same order.
    fn parameters(&self) -> Vec<Arc<RwLock<Parameter>>>;

    /// Parameters along with hierarchical names (e.g. `"conv1.kernel"`).
    fn named_parameters(&self) -> Vec<(String, Arc<RwLock<Parameter>>)> {
        self.parameters()
            .into_iter()
            .enumerate()
            .map(|(idx, param)| {
                let suffix = param
                    .read()
                    .ok()
                    .and_then(|p| p.name().map(str::to_string))
                    .unwrap_or_else(|| idx.to_string());
                (format!("{}.{}", self.name(), suffix), param)
            })
            .collect()
    }
}
