use crate::error::NeuraConvError;

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1usize; rank];
    for i in (0..rank - 1).rev() {
        // Saturate: a zero-length axis elsewhere keeps the tensor empty.
        strides[i] = strides[i + 1].saturating_mul(shape[i + 1]);
    }
    strides
}

/// Number of elements described by `shape`, or `InvalidArgument` if the
/// product does not fit in `usize`.
pub fn checked_numel(shape: &[usize]) -> Result<usize, NeuraConvError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| {
            NeuraConvError::InvalidArgument(format!(
                "Shape {:?} has more elements than fit in usize",
                shape
            ))
        })
}

/// Size of a spatial axis of length `extent` after adding `pad` on both sides.
///
/// `None` if the result overflows `usize`.
pub fn padded_extent(extent: usize, pad: usize) -> Option<usize> {
    pad.checked_mul(2)?.checked_add(extent)
}

/// Splits a rank-4 shape into its `(batch, height, width, channels)` components.
pub fn nhwc_dims(
    shape: &[usize],
    operation: &str,
) -> Result<(usize, usize, usize, usize), NeuraConvError> {
    match *shape {
        [b, h, w, c] => Ok((b, h, w, c)),
        _ => Err(NeuraConvError::ShapeMismatch {
            // Only the rank is known to be wrong here.
            expected: vec![0; 4],
            actual: shape.to_vec(),
            operation: format!("{} (expected a rank-4 NHWC tensor)", operation),
        }),
    }
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
