use crate::error::NeuraConvError;
use crate::tensor::Tensor;

/// Trait defining the common interface for all optimizers.
///
/// An optimizer turns a layer's gradients into new parameter values. It does not
/// write them back: the layer stores what `update` returns, so computing
/// gradients and applying an update rule stay separate.
pub trait Optimizer {
    /// Computes updated parameters for the layer registered as `layer_name`.
    ///
    /// `gradients[i]` pairs with the layer's `i`-th parameter (see
    /// [`Module::parameters`](crate::nn::Module::parameters)). `epoch` is passed
    /// through for update rules that depend on it.
    ///
    /// # Returns
    ///
    /// One tensor per parameter, in the same order.
    ///
    /// # Errors
    ///
    /// `NotFound` if `layer_name` is not registered, `ShapeMismatch` if the
    /// gradients do not line up with the registered parameters.
    fn update(
        &self,
        gradients: &[Tensor],
        layer_name: &str,
        epoch: usize,
    ) -> Result<Vec<Tensor>, NeuraConvError>;

    /// The (fixed) learning rate.
    fn learning_rate(&self) -> f32;
}
