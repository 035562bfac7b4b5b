use crate::error::NeuraConvError;
use crate::tensor::Tensor;
use num_traits::Float;

/// ReLU(x) = max(0, x)
pub fn relu<T: Float>(x: T) -> T {
    if x > T::zero() {
        x
    } else {
        T::zero()
    }
}

/// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
pub fn relu_op(z: &Tensor) -> Tensor {
    z.map(relu)
}

/// Passes `da` through where `z > 0` and zeroes it elsewhere.
///
/// `z == 0` counts as inactive.
pub fn relu_backward_op(da: &Tensor, z: &Tensor) -> Result<Tensor, NeuraConvError> {
    da.zip_map(z, "relu_backward", |g, x| if x <= 0.0 { 0.0 } else { g })
}
