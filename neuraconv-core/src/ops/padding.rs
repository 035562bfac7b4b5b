use crate::error::NeuraConvError;
use crate::tensor::utils::{nhwc_dims, padded_extent};
use crate::tensor::{zeros, Tensor};

/// Zero-pads the two spatial axes of an NHWC tensor.
///
/// `padding = (pad_h, pad_w)` rows/columns are added on *each* side, so a
/// `(B, H, W, C)` tensor becomes `(B, H + 2*pad_h, W + 2*pad_w, C)`. Batch and
/// channel axes are untouched.
pub fn pad(tensor: &Tensor, padding: (usize, usize)) -> Result<Tensor, NeuraConvError> {
    let (batch, height, width, channels) = nhwc_dims(&tensor.shape(), "pad")?;
    let (pad_h, pad_w) = padding;
    if pad_h == 0 && pad_w == 0 {
        return Ok(tensor.clone());
    }

    let padded_dims = padded_extent(height, pad_h).zip(padded_extent(width, pad_w));
    let (out_h, out_w) = padded_dims.ok_or_else(|| NeuraConvError::ShapeMismatch {
        expected: vec![batch, height, width, channels],
        actual: vec![pad_h, pad_w],
        operation: "pad (padded size overflows usize)".to_string(),
    })?;
    let mut padded = zeros(&[batch, out_h, out_w, channels])?;
    let src_strides = tensor.strides().to_vec();
    let dst_strides = padded.strides().to_vec();
    let src = tensor.data();
    let dst = padded.data_mut();
    // Rows are contiguous along (width, channel), so copy one row at a time.
    let row_len = width * channels;
    for i in 0..batch {
        for h in 0..height {
            let src_start = i * src_strides[0] + h * src_strides[1];
            let dst_start =
                i * dst_strides[0] + (h + pad_h) * dst_strides[1] + pad_w * dst_strides[2];
            dst[dst_start..dst_start + row_len]
                .copy_from_slice(&src[src_start..src_start + row_len]);
        }
    }
    Ok(padded)
}

/// Inverse of [`pad`]: strips exactly `padding` rows/columns from each spatial side.
///
/// A zero padding crops nothing.
pub fn crop(tensor: &Tensor, padding: (usize, usize)) -> Result<Tensor, NeuraConvError> {
    let shape = tensor.shape();
    let (batch, height, width, channels) = nhwc_dims(&shape, "crop")?;
    let (pad_h, pad_w) = padding;
    let strip_h = padded_extent(0, pad_h).unwrap_or(usize::MAX);
    let strip_w = padded_extent(0, pad_w).unwrap_or(usize::MAX);
    if height < strip_h || width < strip_w {
        return Err(NeuraConvError::ShapeMismatch {
            expected: vec![batch, strip_h, strip_w, channels],
            actual: shape,
            operation: "crop (tensor smaller than the padding to strip)".to_string(),
        });
    }
    if pad_h == 0 && pad_w == 0 {
        return Ok(tensor.clone());
    }

    let out_h = height - strip_h;
    let out_w = width - strip_w;
    let mut cropped = zeros(&[batch, out_h, out_w, channels])?;
    let src_strides = tensor.strides().to_vec();
    let dst_strides = cropped.strides().to_vec();
    let src = tensor.data();
    let dst = cropped.data_mut();
    let row_len = out_w * channels;
    for i in 0..batch {
        for h in 0..out_h {
            let src_start =
                i * src_strides[0] + (h + pad_h) * src_strides[1] + pad_w * src_strides[2];
            let dst_start = i * dst_strides[0] + h * dst_strides[1];
            dst[dst_start..dst_start + row_len]
                .copy_from_slice(&src[src_start..src_start + row_len]);
        }
    }
    Ok(cropped)
}

#[cfg(test)]
#[path = "padding_test.rs"]
mod tests;
