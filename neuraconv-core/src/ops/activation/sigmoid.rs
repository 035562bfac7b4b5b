use crate::error::NeuraConvError;
use crate::tensor::Tensor;
use num_traits::Float;

/// sigmoid(x) = 1 / (1 + e^-x)
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

pub fn sigmoid_op(z: &Tensor) -> Tensor {
    z.map(sigmoid)
}

/// dZ = dA * a * (1 - a), with `a` recomputed from `z`.
pub fn sigmoid_backward_op(da: &Tensor, z: &Tensor) -> Result<Tensor, NeuraConvError> {
    da.zip_map(z, "sigmoid_backward", |g, x| {
        let a = sigmoid(x);
        g * a * (1.0 - a)
    })
}
