mod common;

use common::{assert_all_close, nhwc};
use neuraconv_core::error::NeuraConvError;
use neuraconv_core::nn::layers::conv2d::Conv2d;
use neuraconv_core::ops::activation::get_activation;
use neuraconv_core::tensor::{ones, zeros};

fn diagonal_conv() -> Result<Conv2d, NeuraConvError> {
    let mut conv = Conv2d::new(1, 1, "diag", 2, 1, 0, "random")?;
    conv.set_parameters(nhwc(vec![1.0, 0.0, 0.0, 1.0], [2, 2, 1, 1]), zeros(&[1, 1, 1, 1])?)?;
    Ok(conv)
}

#[test]
fn diagonal_kernel_on_ones_image() -> Result<(), NeuraConvError> {
    let conv = diagonal_conv()?;
    let input = ones(&[1, 3, 3, 1])?;

    let output = conv.forward(&input)?;
    assert_eq!(output.shape(), vec![1, 2, 2, 1]);
    assert_all_close(output.data(), &[2.0; 4], 1e-6);

    let (input_grad, grads) = conv.backward(&ones(&[1, 2, 2, 1])?, &input)?;
    assert_eq!(grads.kernel.shape(), vec![2, 2, 1, 1]);
    assert_all_close(grads.kernel.data(), &[4.0; 4], 1e-6);
    assert_eq!(grads.bias.shape(), vec![1, 1, 1, 1]);
    assert_all_close(grads.bias.data(), &[4.0], 1e-6);

    // Diagonal taps only: centre pixel is hit twice, the off-diagonal corners never.
    assert_eq!(input_grad.shape(), vec![1, 3, 3, 1]);
    assert_all_close(
        input_grad.data(),
        &[1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0, 1.0],
        1e-6,
    );
    Ok(())
}

#[test]
fn bias_gradient_sums_over_batch() -> Result<(), NeuraConvError> {
    let conv = diagonal_conv()?;
    let input = ones(&[3, 3, 3, 1])?;
    let (_, grads) = conv.backward(&ones(&[3, 2, 2, 1])?, &input)?;
    // 3 batch elements x 4 positions, no averaging.
    assert_all_close(grads.bias.data(), &[12.0], 1e-6);
    assert_all_close(grads.kernel.data(), &[12.0; 4], 1e-6);
    Ok(())
}

#[test]
fn conv_then_relu_round_trip() -> Result<(), NeuraConvError> {
    let mut conv = Conv2d::new(1, 1, "signed", 1, 1, 0, "random")?;
    conv.set_parameters(nhwc(vec![-1.0], [1, 1, 1, 1]), nhwc(vec![0.5], [1, 1, 1, 1]))?;
    let (relu, relu_backward) = get_activation("relu")?;

    let input = nhwc(vec![0.0, 0.5, 1.0, -2.0], [1, 2, 2, 1]);
    let z = conv.forward(&input)?;
    assert_all_close(z.data(), &[0.5, 0.0, -0.5, 2.5], 1e-6);
    let a = relu.forward(&z);
    assert_all_close(a.data(), &[0.5, 0.0, 0.0, 2.5], 1e-6);

    let dz = relu_backward(&ones(&[1, 2, 2, 1])?, &z)?;
    // z == 0 counts as inactive.
    assert_all_close(dz.data(), &[1.0, 0.0, 0.0, 1.0], 1e-6);

    let (dx, grads) = conv.backward(&dz, &input)?;
    assert_all_close(dx.data(), &[-1.0, 0.0, 0.0, -1.0], 1e-6);
    assert_all_close(grads.kernel.data(), &[-2.0], 1e-6);
    assert_all_close(grads.bias.data(), &[2.0], 1e-6);
    Ok(())
}
