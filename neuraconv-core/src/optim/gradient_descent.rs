use crate::error::NeuraConvError;
use crate::optim::optimizer_trait::Optimizer;
use crate::optim::registry::LayerRegistry;
use crate::tensor::Tensor;

/// Plain gradient descent: `p = p - lr * grad(p)`.
///
/// Holds the session's [`LayerRegistry`] so it can read each layer's current
/// parameters. Stateless beyond the learning rate; an optimizer with momentum
/// would keep its per-layer buffers keyed by the same names.
#[derive(Debug)]
pub struct GradientDescent {
    registry: LayerRegistry,
    learning_rate: f32,
}

impl GradientDescent {
    /// Creates a new gradient-descent optimizer over `registry`.
    ///
    /// # Errors
    /// `InvalidArgument` unless `learning_rate` is finite and positive.
    pub fn new(registry: LayerRegistry, learning_rate: f32) -> Result<Self, NeuraConvError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NeuraConvError::InvalidArgument(format!(
                "Learning rate must be finite and > 0, got {}",
                learning_rate
            )));
        }
        Ok(GradientDescent {
            registry,
            learning_rate,
        })
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Mutable access, e.g. to register layers created after the optimizer.
    pub fn registry_mut(&mut self) -> &mut LayerRegistry {
        &mut self.registry
    }
}

impl Optimizer for GradientDescent {
    fn update(
        &self,
        gradients: &[Tensor],
        layer_name: &str,
        epoch: usize,
    ) -> Result<Vec<Tensor>, NeuraConvError> {
        let params = self.registry.get(layer_name)?.snapshot()?;
        if params.len() != gradients.len() {
            return Err(NeuraConvError::shape_mismatch(
                vec![params.len()],
                vec![gradients.len()],
                "GradientDescent::update (gradient count)",
            ));
        }
        log::trace!(
            "GradientDescent step for '{}' (epoch {}, lr {})",
            layer_name,
            epoch,
            self.learning_rate
        );

        let lr = self.learning_rate;
        params
            .iter()
            .zip(gradients.iter())
            .map(|(param, grad)| param.zip_map(grad, "GradientDescent::update", |p, g| p - lr * g))
            .collect()
    }

    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

#[cfg(test)]
#[path = "gradient_descent_test.rs"]
mod tests;
