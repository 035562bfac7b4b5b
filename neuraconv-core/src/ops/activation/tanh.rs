use crate::error::NeuraConvError;
use crate::tensor::Tensor;
use num_traits::Float;

pub fn tanh<T: Float>(x: T) -> T {
    x.tanh()
}

pub fn tanh_op(z: &Tensor) -> Tensor {
    z.map(tanh)
}

/// dZ = (1 - tanh(z)^2) * dA
pub fn tanh_backward_op(da: &Tensor, z: &Tensor) -> Result<Tensor, NeuraConvError> {
    da.zip_map(z, "tanh_backward", |g, x| {
        let a = tanh(x);
        (1.0 - a * a) * g
    })
}
