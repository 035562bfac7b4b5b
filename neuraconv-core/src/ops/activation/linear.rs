use crate::error::NeuraConvError;
use crate::tensor::Tensor;

pub fn linear_op(z: &Tensor) -> Tensor {
    z.clone()
}

/// Identity gradient: returns a copy of `da`.
///
/// `z` only takes part in the shape check.
pub fn linear_backward_op(da: &Tensor, z: &Tensor) -> Result<Tensor, NeuraConvError> {
    da.zip_map(z, "linear_backward", |g, _| g)
}
